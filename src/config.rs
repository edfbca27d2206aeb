//! Configuration for dictionary sourcing and cache placement.
//!
//! Mirrors the teacher's `Config`-with-defaults-and-serde convention: a plain
//! struct, a hand-written `Default` impl documenting each field, and TOML
//! round-trip helpers for callers who want to persist settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the lexicon text comes from.
///
/// `Default` never touches the filesystem for the word list itself (it is
/// `include_str!`-embedded at compile time) but still participates in cache
/// filename selection, per §4.1 step 2.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum DictSource {
    /// The lexicon bundled with the crate.
    Default,
    /// A user-supplied dictionary file on disk.
    Path(PathBuf),
}

impl Default for DictSource {
    fn default() -> Self {
        DictSource::Default
    }
}

/// Runtime configuration for a [`crate::Jieba`] instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Which lexicon to load. Defaults to the bundled word list.
    pub dictionary: DictSource,
    /// Override the cache file name/path. When `None`, the name is derived
    /// from `dictionary` per §4.1 step 2.
    pub cache_file: Option<PathBuf>,
    /// Override the directory cache files are written under. Defaults to
    /// the system temp directory.
    pub tmp_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictSource::Default,
            cache_file: None,
            tmp_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The directory cache files should be written under.
    pub fn resolved_tmp_dir(&self) -> PathBuf {
        self.tmp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}
