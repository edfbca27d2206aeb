//! The segmentation driver (§4.5, §4.6): pre-splits input into Han-ish and
//! "other" blocks, chooses a block cutter, and interleaves their output.
//! Also implements search-mode re-granulation and offset-bearing tokenize.

use crate::dag::build_dag;
use crate::hmm;
use crate::lexicon::Lexicon;
use crate::route::compute_route;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_HAN_PRECISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{4E00}-\u{9FD5}A-Za-z0-9+#&._%\-]+").unwrap());
static RE_SKIP_PRECISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r\n|\s)+").unwrap());
static RE_HAN_FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{4E00}-\u{9FD5}]+").unwrap());
static RE_SKIP_FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9+#\n]+").unwrap());
static RE_ENG_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]$").unwrap());

/// Split `text` into `(is_han, fragment)` blocks by finding maximal matches
/// of `han_re` and treating the gaps between them as "other" blocks.
fn split_blocks<'a>(text: &'a str, han_re: &Regex) -> Vec<(bool, &'a str)> {
    let mut blocks = Vec::new();
    let mut last = 0usize;
    for m in han_re.find_iter(text) {
        if m.start() > last {
            blocks.push((false, &text[last..m.start()]));
        }
        blocks.push((true, m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        blocks.push((false, &text[last..]));
    }
    blocks
}

/// Full-mode cutter (§4.5): emit every dictionary match in the DAG, with the
/// single-character special case that avoids duplicate emissions.
pub fn cut_all(lexicon: &Lexicon, run: &[char]) -> Vec<String> {
    let dag = build_dag(lexicon, run);
    let n = run.len();
    let mut out = Vec::new();
    let mut last_emitted_end: isize = -1;
    for k in 0..n {
        let ends = &dag[&k];
        if ends.len() == 1 && (k as isize) > last_emitted_end {
            let e = ends[0];
            out.push(run[k..=e].iter().collect());
            last_emitted_end = e as isize;
        } else {
            for &e in ends {
                if e > k {
                    out.push(run[k..=e].iter().collect());
                    last_emitted_end = e as isize;
                }
            }
        }
    }
    out
}

/// Precise mode without HMM: walk the route; consecutive single-character
/// ASCII-alphanumeric emissions are buffered and flushed as one token.
pub fn cut_no_hmm(lexicon: &Lexicon, word: &str) -> Vec<String> {
    let run: Vec<char> = word.chars().collect();
    let n = run.len();
    if n == 0 {
        return Vec::new();
    }
    let dag = build_dag(lexicon, &run);
    let route = compute_route(lexicon, &run, &dag);

    let mut out = Vec::new();
    let mut buf = String::new();
    let mut x = 0usize;
    while x < n {
        let y = route[x].1 + 1;
        let l_word: String = run[x..y].iter().collect();
        if l_word.chars().count() == 1 && RE_ENG_CHAR.is_match(&l_word) {
            buf.push_str(&l_word);
        } else {
            if !buf.is_empty() {
                out.push(std::mem::take(&mut buf));
            }
            out.push(l_word);
        }
        x = y;
    }
    if !buf.is_empty() {
        out.push(buf);
    }
    out
}

/// Precise mode with HMM (§4.5): walk the route; runs of single-character
/// route emissions that the lexicon failed to recognize as a whole are
/// handed to the HMM fallback.
pub fn cut_hmm(lexicon: &Lexicon, run: &[char]) -> Vec<String> {
    let n = run.len();
    if n == 0 {
        return Vec::new();
    }
    let dag = build_dag(lexicon, run);
    let route = compute_route(lexicon, run, &dag);

    let mut out = Vec::new();
    let mut buf: Vec<char> = Vec::new();
    let mut x = 0usize;

    let flush = |buf: &mut Vec<char>, out: &mut Vec<String>, lexicon: &Lexicon| {
        if buf.is_empty() {
            return;
        }
        if buf.len() == 1 {
            out.push(buf.iter().collect());
        } else {
            let word: String = buf.iter().collect();
            if lexicon.freq(&word) == 0 {
                out.extend(hmm::cut(buf, lexicon.force_split()));
            } else {
                out.extend(buf.iter().map(|c| c.to_string()));
            }
        }
        buf.clear();
    };

    while x < n {
        let y = route[x].1 + 1;
        if y - x == 1 {
            buf.push(run[x]);
        } else {
            flush(&mut buf, &mut out, lexicon);
            out.push(run[x..y].iter().collect());
        }
        x = y;
    }
    flush(&mut buf, &mut out, lexicon);
    out
}

/// Apply one precise-mode Han-run block through the requested cutter.
fn cut_block(lexicon: &Lexicon, run: &str, use_hmm: bool) -> Vec<String> {
    if use_hmm {
        let chars: Vec<char> = run.chars().collect();
        cut_hmm(lexicon, &chars)
    } else {
        cut_no_hmm(lexicon, run)
    }
}

/// Top-level `cut` (§4.5, §6): split `text` into Han-ish/other blocks per
/// the mode's regex dialect, cut each Han-ish block, and pass "other"
/// fragments through verbatim (whitespace) or character-by-character
/// (precise mode) / whole (full mode).
pub fn cut(lexicon: &Lexicon, text: &str, cut_all_mode: bool, use_hmm: bool) -> Vec<String> {
    let (han_re, skip_re): (&Regex, &Regex) = if cut_all_mode {
        (&RE_HAN_FULL, &RE_SKIP_FULL)
    } else {
        (&RE_HAN_PRECISE, &RE_SKIP_PRECISE)
    };

    let mut out = Vec::new();
    for (is_han, blk) in split_blocks(text, han_re) {
        if blk.is_empty() {
            continue;
        }
        if is_han {
            if cut_all_mode {
                let run: Vec<char> = blk.chars().collect();
                out.extend(cut_all(lexicon, &run));
            } else {
                out.extend(cut_block(lexicon, blk, use_hmm));
            }
        } else {
            // Split the non-Han block itself on whitespace runs so that a
            // fragment like ", " (punctuation immediately before a space)
            // is not treated as a single all-or-nothing piece.
            for (is_ws, piece) in split_blocks(blk, skip_re) {
                if piece.is_empty() {
                    continue;
                }
                if is_ws || cut_all_mode {
                    out.push(piece.to_string());
                } else {
                    for ch in piece.chars() {
                        out.push(ch.to_string());
                    }
                }
            }
        }
    }
    out
}

/// Every 2-gram and (for length > 3) 3-gram of `word` that is itself a
/// lexicon word, in left-to-right order, 2-grams before 3-grams (§4.6).
fn sub_grams(lexicon: &Lexicon, word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    if n > 2 {
        for i in 0..n - 1 {
            let gram: String = chars[i..i + 2].iter().collect();
            if lexicon.freq(&gram) > 0 {
                out.push(gram);
            }
        }
    }
    if n > 3 {
        for i in 0..n - 2 {
            let gram: String = chars[i..i + 3].iter().collect();
            if lexicon.freq(&gram) > 0 {
                out.push(gram);
            }
        }
    }
    out
}

/// `cut_for_search` (§4.6): precise-mode segmentation, with sub-grams of
/// each word yielded immediately before the word itself.
pub fn cut_for_search(lexicon: &Lexicon, text: &str, use_hmm: bool) -> Vec<String> {
    let words = cut(lexicon, text, false, use_hmm);
    let mut out = Vec::new();
    for w in words {
        out.extend(sub_grams(lexicon, &w));
        out.push(w);
    }
    out
}

/// Tokenize mode: `default` mirrors `cut`; `search` mirrors `cut_for_search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeMode {
    Default,
    Search,
}

/// `(word, start, end)` with code-point offsets into the original input.
pub type Token = (String, usize, usize);

/// `tokenize` (§4.6): yield `(word, start, end)` code-point offsets.
pub fn tokenize(
    lexicon: &Lexicon,
    text: &str,
    mode: TokenizeMode,
    use_hmm: bool,
) -> Vec<Token> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for w in cut(lexicon, text, false, use_hmm) {
        let width = w.chars().count();
        if mode == TokenizeMode::Search {
            let chars: Vec<char> = w.chars().collect();
            let n = chars.len();
            if n > 2 {
                for i in 0..n - 1 {
                    let gram: String = chars[i..i + 2].iter().collect();
                    if lexicon.freq(&gram) > 0 {
                        out.push((gram, start + i, start + i + 2));
                    }
                }
            }
            if n > 3 {
                for i in 0..n - 2 {
                    let gram: String = chars[i..i + 3].iter().collect();
                    if lexicon.freq(&gram) > 0 {
                        out.push((gram, start + i, start + i + 3));
                    }
                }
            }
        }
        out.push((w, start, start + width));
        start += width;
    }
    out
}
