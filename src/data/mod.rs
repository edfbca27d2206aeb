//! Bundled default data: the prefix lexicon and the HMM parameter tables.

pub mod hmm_tables;

/// The bundled default dictionary, `word freq [tag]` per line (§4.1).
pub const DEFAULT_DICT: &str = include_str!("dict.txt");
