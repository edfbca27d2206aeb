//! finalseg: the 4-state (B,M,E,S) HMM fallback for character runs the
//! lexicon failed to segment (§4.4).

use crate::data::hmm_tables;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A state in the Viterbi lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    B,
    M,
    E,
    S,
}

const STATES: [State; 4] = [State::B, State::M, State::E, State::S];

impl State {
    fn idx(self) -> usize {
        match self {
            State::B => 0,
            State::M => 1,
            State::E => 2,
            State::S => 3,
        }
    }

    /// Legal predecessor states, per §4.4: B←{E,S}, M←{M,B}, E←{B,M}, S←{S,E}.
    fn predecessors(self) -> &'static [State] {
        match self {
            State::B => &[State::E, State::S],
            State::M => &[State::M, State::B],
            State::E => &[State::B, State::M],
            State::S => &[State::S, State::E],
        }
    }
}

struct Tables {
    start_p: [f64; 4],
    trans_p: [[f64; 4]; 4],
    emit_p: [HashMap<char, f64>; 4],
    /// Per-state floor used for characters absent from `emit_p[state]`
    /// (§3: "unknown emissions use the minimum observed emission log-prob").
    emit_floor: [f64; 4],
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let mut emit_p: [HashMap<char, f64>; 4] = Default::default();
    for &(state, ch, p) in hmm_tables::EMIT_P {
        emit_p[state.idx()].insert(ch, p);
    }
    Tables {
        start_p: hmm_tables::START_P,
        trans_p: hmm_tables::TRANS_P,
        emit_p,
        emit_floor: hmm_tables::EMIT_FLOOR,
    }
});

fn emit(tables: &Tables, state: State, ch: char) -> f64 {
    tables.emit_p[state.idx()]
        .get(&ch)
        .copied()
        .unwrap_or(tables.emit_floor[state.idx()])
}

/// Run Viterbi over `chars` and return the best state path (one state per
/// character). The winning final state is restricted to `E` or `S`: a word
/// can only end in "end-of-word" or "single-character-word" (mirrors the
/// upstream finalseg implementation this module is modeled on).
fn viterbi(chars: &[char]) -> Vec<State> {
    let tables = &*TABLES;
    let n = chars.len();
    debug_assert!(n > 0);

    // v[t][state] = best log-prob of a path ending in `state` at position t.
    let mut v: Vec<[f64; 4]> = Vec::with_capacity(n);
    let mut backptr: Vec<[Option<State>; 4]> = Vec::with_capacity(n);

    let mut v0 = [f64::NEG_INFINITY; 4];
    for &s in &STATES {
        v0[s.idx()] = tables.start_p[s.idx()] + emit(tables, s, chars[0]);
    }
    v.push(v0);
    backptr.push([None; 4]);

    for t in 1..n {
        let mut vt = [f64::NEG_INFINITY; 4];
        let mut bp: [Option<State>; 4] = [None; 4];
        for &s in &STATES {
            let em = emit(tables, s, chars[t]);
            let mut best = f64::NEG_INFINITY;
            let mut best_prev = None;
            for &prev in s.predecessors() {
                let cand = v[t - 1][prev.idx()] + tables.trans_p[prev.idx()][s.idx()] + em;
                if cand > best {
                    best = cand;
                    best_prev = Some(prev);
                }
            }
            vt[s.idx()] = best;
            bp[s.idx()] = best_prev;
        }
        v.push(vt);
        backptr.push(bp);
    }

    let last = v.last().unwrap();
    let final_state = if last[State::E.idx()] >= last[State::S.idx()] {
        State::E
    } else {
        State::S
    };

    let mut path = vec![final_state; n];
    let mut state = final_state;
    for t in (1..n).rev() {
        let prev = backptr[t][state.idx()].unwrap_or(State::S);
        path[t - 1] = prev;
        state = prev;
    }
    path
}

/// Decode a Viterbi path into tokens: cut after every `E` and `S` state.
fn path_to_tokens(chars: &[char], path: &[State]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut begin = 0usize;
    let mut nexti = 0usize;
    for (i, &state) in path.iter().enumerate() {
        match state {
            State::B => begin = i,
            State::E => {
                tokens.push(chars[begin..=i].iter().collect());
                nexti = i + 1;
            }
            State::S => {
                tokens.push(chars[i..=i].iter().collect());
                nexti = i + 1;
            }
            State::M => {}
        }
    }
    if nexti < chars.len() {
        tokens.push(chars[nexti..].iter().collect());
    }
    tokens
}

/// Segment `buf` via the HMM, honoring `force_split`: any character in
/// `force_split` is cut out as its own token and never analyzed by Viterbi
/// alongside its neighbors (§4.4).
pub fn cut(buf: &[char], force_split: &std::collections::HashSet<char>) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut seg_start = 0usize;

    let mut flush = |chars: &[char], tokens: &mut Vec<String>| {
        if chars.is_empty() {
            return;
        }
        if chars.len() == 1 {
            tokens.push(chars.iter().collect());
            return;
        }
        let path = viterbi(chars);
        tokens.extend(path_to_tokens(chars, &path));
    };

    for (i, &ch) in buf.iter().enumerate() {
        if force_split.contains(&ch) {
            flush(&buf[seg_start..i], &mut tokens);
            tokens.push(ch.to_string());
            seg_start = i + 1;
        }
    }
    flush(&buf[seg_start..], &mut tokens);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_an_unknown_two_char_run_into_one_token() {
        let buf: Vec<char> = "杭研".chars().collect();
        let force_split = std::collections::HashSet::new();
        let tokens = cut(&buf, &force_split);
        assert_eq!(tokens, vec!["杭研".to_string()]);
    }

    #[test]
    fn single_char_buffer_is_its_own_token() {
        let buf: Vec<char> = "甲".chars().collect();
        let force_split = std::collections::HashSet::new();
        assert_eq!(cut(&buf, &force_split), vec!["甲".to_string()]);
    }

    #[test]
    fn force_split_character_is_isolated() {
        let buf: Vec<char> = "杭研".chars().collect();
        let mut force_split = std::collections::HashSet::new();
        force_split.insert('研');
        let tokens = cut(&buf, &force_split);
        assert_eq!(tokens, vec!["杭".to_string(), "研".to_string()]);
    }
}
