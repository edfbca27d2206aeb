//! The prefix dictionary: word → frequency, augmented with zero-frequency
//! rows for every proper prefix of every word (§3, §4.1).
//!
//! The same map backs both "is this a word" and "is this a prefix of some
//! word" queries: a key present with `freq == 0` is a prefix sentinel, not a
//! word. This is what lets [`crate::dag::build_dag`] keep extending a
//! fragment past a non-word prefix like "清" on the way to "清华大学".

use ahash::AHashMap;
use std::collections::HashSet;

/// Word frequencies plus the prefix-closure sentinels described in §3.
///
/// Created empty, populated once by the dictionary loader, and thereafter
/// mutated only through [`Lexicon::add_word`] / [`Lexicon::del_word`] /
/// [`Lexicon::suggest_freq`] (the caller is responsible for serializing
/// mutation with initialization — see [`crate::Jieba`]'s locking).
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    freq: AHashMap<String, u32>,
    total: u64,
    user_word_tag_tab: AHashMap<String, String>,
    /// Characters that must never appear mid-word in HMM output (§4.4).
    force_split: HashSet<char>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency of `word`, or `0` if it is not a key at all (neither a word
    /// nor a prefix sentinel).
    pub fn freq(&self, word: &str) -> u32 {
        self.freq.get(word).copied().unwrap_or(0)
    }

    /// Whether `word` is a key in the map (word or zero-freq prefix).
    pub fn contains_key(&self, word: &str) -> bool {
        self.freq.contains_key(word)
    }

    /// Sum of frequencies of real words (§3 invariant P2).
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn tag(&self, word: &str) -> Option<&str> {
        self.user_word_tag_tab.get(word).map(|s| s.as_str())
    }

    pub fn force_split(&self) -> &HashSet<char> {
        &self.force_split
    }

    pub fn len(&self) -> usize {
        self.freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    /// Insert `word` with `freq`, along with zero-freq sentinels for every
    /// non-empty proper prefix of `word` that isn't already a key
    /// (invariant P1). Used by the loader while building the initial map;
    /// does not touch `total` (the loader accumulates that itself).
    pub(crate) fn insert_raw(&mut self, word: String, freq: u32) {
        for (i, _) in word.char_indices().skip(1) {
            let prefix = &word[..i];
            self.freq.entry(prefix.to_string()).or_insert(0);
        }
        self.freq.insert(word, freq);
    }

    pub(crate) fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    pub(crate) fn set_tag(&mut self, word: &str, tag: &str) {
        self.user_word_tag_tab.insert(word.to_string(), tag.to_string());
    }

    /// Replace the map wholesale with an already-complete frequency map
    /// (e.g. one deserialized from the binary cache, which already carries
    /// the prefix sentinels) and set `total` to match.
    pub(crate) fn load_raw(&mut self, freq: std::collections::HashMap<String, u32>, total: u64) {
        self.freq = freq.into_iter().collect();
        self.total = total;
    }

    /// A plain-`HashMap` snapshot of the frequency map, for cache
    /// serialization (`AHashMap` itself is not `Serialize`).
    pub(crate) fn snapshot_freq(&self) -> std::collections::HashMap<String, u32> {
        self.freq.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Add `word` to the dictionary (§4.7).
    ///
    /// If `freq` is `None` it is computed via `suggest_freq(word, tune=false)`.
    /// If the resulting frequency is `0`, every character of `word` is added
    /// to `force_split` — the mechanism a caller uses to force a word apart
    /// in HMM output.
    pub fn add_word(&mut self, word: &str, freq: Option<u32>, tag: Option<&str>) -> u32 {
        let freq = freq.unwrap_or_else(|| self.suggest_freq(Segment::Word(word), false));
        let prev = self.freq(word);
        self.total = self.total.saturating_sub(prev as u64) + freq as u64;
        self.insert_raw(word.to_string(), freq);
        if let Some(tag) = tag {
            self.user_word_tag_tab.insert(word.to_string(), tag.to_string());
        }
        if freq == 0 {
            for ch in word.chars() {
                self.force_split.insert(ch);
            }
        }
        freq
    }

    /// Equivalent to `add_word(word, Some(0), None)`.
    pub fn del_word(&mut self, word: &str) {
        self.add_word(word, Some(0), None);
    }

    /// Suggest a frequency that forces `segment` to be cut the way the
    /// caller wants (§4.7).
    ///
    /// `Segment::Word(w)` treats `w` as a whole: the suggested frequency
    /// makes `w` likely enough to beat its current precise-mode split.
    /// `Segment::Parts(parts)` treats the concatenation of `parts` as the
    /// word: the suggested frequency makes that concatenation unlikely
    /// enough to be split into exactly those parts.
    pub fn suggest_freq(&mut self, segment: Segment<'_>, tune: bool) -> u32 {
        let ftotal = self.total.max(1) as f64;
        let (word, new_freq) = match segment {
            Segment::Word(word) => {
                let pieces = crate::driver::cut_no_hmm(self, word);
                let mut p = 1.0f64;
                for seg in &pieces {
                    p *= self.freq(seg).max(1) as f64 / ftotal;
                }
                let existing = self.freq(word);
                let existing = if existing == 0 { 1 } else { existing };
                let new_freq = ((p * self.total as f64) as u32 + 1).max(existing);
                (word.to_string(), new_freq)
            }
            Segment::Parts(parts) => {
                let word: String = parts.iter().copied().collect();
                let mut p = 1.0f64;
                for seg in parts {
                    p *= self.freq(seg).max(1) as f64 / ftotal;
                }
                let existing = self.freq(&word);
                let new_freq = ((p * self.total as f64) as u32).min(existing);
                (word, new_freq)
            }
        };
        if tune {
            self.add_word(&word, Some(new_freq), None);
        }
        new_freq
    }
}

/// Input to [`Lexicon::suggest_freq`].
pub enum Segment<'a> {
    /// Treat the whole string as one word.
    Word(&'a str),
    /// Treat the concatenation of these sub-words as one word.
    Parts(&'a [&'a str]),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> Lexicon {
        let mut lex = Lexicon::new();
        for (w, f) in [
            ("我", 100u32),
            ("来到", 50),
            ("北京", 80),
            ("清华", 10),
            ("清华大学", 60),
            ("大学", 70),
        ] {
            lex.insert_raw(w.to_string(), f);
        }
        lex.set_total(100 + 50 + 80 + 10 + 60 + 70);
        lex
    }

    #[test]
    fn prefix_closure_holds_after_insert() {
        let lex = build();
        // "清华大学"'s proper prefixes: 清, 清华, 清华大
        assert!(lex.contains_key("清"));
        assert!(lex.contains_key("清华"));
        assert!(lex.contains_key("清华大"));
        assert_eq!(lex.freq("清华大"), 0);
    }

    #[test]
    fn add_word_round_trip_preserves_prefix_closure() {
        let mut lex = build();
        lex.add_word("清华园", Some(5), None);
        assert_eq!(lex.freq("清华园"), 5);
        assert!(lex.contains_key("清"));
        assert!(lex.contains_key("清华"));
        assert!(lex.contains_key("清华园"));
    }

    #[test]
    fn del_word_zeroes_frequency_and_forces_split() {
        let mut lex = build();
        lex.del_word("清华大学");
        assert_eq!(lex.freq("清华大学"), 0);
        for ch in "清华大学".chars() {
            assert!(lex.force_split().contains(&ch));
        }
    }

    #[test]
    fn add_word_updates_total_by_delta() {
        let mut lex = build();
        let before = lex.total();
        lex.add_word("清华", Some(1000), None);
        assert_eq!(lex.total(), before - 10 + 1000);
    }
}
