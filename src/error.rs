//! Error types for dictionary loading and segmentation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by dictionary loading, user-dictionary loading, and tokenization.
///
/// `CacheWriteFailed` is never returned to a caller: it is logged at the load
/// site via `tracing::warn!` and swallowed, since a missing cache never fails
/// `initialize` (see §4.1 of the design).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dictionary entry in {file} at line {line}: {text:?}")]
    InvalidDictEntry {
        file: String,
        line: usize,
        text: String,
    },

    #[error("dictionary file {file} is not valid UTF-8")]
    DictNotUtf8 { file: String },

    #[error("dictionary file not found: {}", .path.display())]
    DictNotFound { path: PathBuf },

    #[error("jieba: the input parameter should be unicode")]
    NonUnicodeInput,

    #[error("failed to write cache file {}: {source}", .path.display())]
    CacheWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
