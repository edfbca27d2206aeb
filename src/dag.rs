//! DAG construction over a single Han-ish run (§4.2).

use crate::lexicon::Lexicon;
use ahash::AHashMap;

/// `dag[start]` is the ordered list of inclusive end indices at which a
/// dictionary word (or the single-character fallback) begins at `start`.
/// Indices are over code points in `run`, not bytes (§3 invariant D1/D2).
pub type Dag = AHashMap<usize, Vec<usize>>;

/// Build the DAG for `run`, a slice of code points with no whitespace or
/// delimiter characters.
pub fn build_dag(lexicon: &Lexicon, run: &[char]) -> Dag {
    let n = run.len();
    let mut dag: Dag = AHashMap::with_capacity(n);
    for k in 0..n {
        let mut ends = Vec::new();
        let mut i = k;
        let mut frag: String = run[k..=k].iter().collect();
        while i < n && lexicon.contains_key(&frag) {
            if lexicon.freq(&frag) > 0 {
                ends.push(i);
            }
            i += 1;
            if i >= n {
                break;
            }
            frag = run[k..=i].iter().collect();
        }
        if ends.is_empty() {
            ends.push(k);
        }
        dag.insert(k, ends);
    }
    dag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        let mut lex = Lexicon::new();
        lex.insert_raw("清".to_string(), 0); // prefix sentinel only
        lex.insert_raw("清华".to_string(), 10);
        lex.insert_raw("清华大学".to_string(), 60);
        lex.set_total(70);
        lex
    }

    #[test]
    fn extends_past_zero_freq_prefix() {
        let lex = lex();
        let run: Vec<char> = "清华大学".chars().collect();
        let dag = build_dag(&lex, &run);
        // "清" alone is a zero-freq prefix, so it must not appear as an end
        // for k=0 unless no other option exists; here 清华 (end=1) and
        // 清华大学 (end=3) both qualify, plus the single-char fallback at k=2,3.
        assert_eq!(dag[&0], vec![1, 3]);
    }

    #[test]
    fn single_char_fallback_when_no_dictionary_hit() {
        let lex = Lexicon::new();
        let run: Vec<char> = "甲".chars().collect();
        let dag = build_dag(&lex, &run);
        assert_eq!(dag[&0], vec![0]);
    }

    #[test]
    fn every_start_has_non_empty_ends() {
        let lex = lex();
        let run: Vec<char> = "清华大学".chars().collect();
        let dag = build_dag(&lex, &run);
        for k in 0..run.len() {
            assert!(!dag[&k].is_empty());
        }
    }
}
