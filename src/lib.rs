//! Chinese word segmentation: prefix lexicon, DAG/DP path selection, and an
//! HMM fallback for character runs the lexicon doesn't recognize (§1).
//!
//! ```
//! let jieba = zhseg::Jieba::new().unwrap();
//! let words = jieba.lcut("我来到北京清华大学", false, true);
//! assert_eq!(words, vec!["我", "来到", "北京", "清华大学"]);
//! ```

mod config;
mod dag;
mod data;
mod driver;
mod error;
mod hmm;
mod lexicon;
mod loader;
mod route;

pub use config::{Config, DictSource};
pub use driver::{Token, TokenizeMode};
pub use error::{Error, Result};
pub use lexicon::{Lexicon, Segment};

use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::{Mutex, RwLock};

/// A segmenter instance: a loaded [`Lexicon`] plus the [`Config`] it was
/// built from.
///
/// Read-only segmentation (`cut`, `cut_for_search`, `tokenize`) takes a
/// shared reference and never blocks. Mutation (`add_word`, `del_word`,
/// `load_userdict`, `suggest_freq`, `set_dictionary`) takes the instance's
/// exclusive lock (§5).
pub struct Jieba {
    lexicon: RwLock<Lexicon>,
    config: Mutex<Config>,
}

impl Jieba {
    /// Build a `Jieba` from the bundled default dictionary.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Build a `Jieba` from a dictionary file on disk.
    pub fn with_dict<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(Config {
            dictionary: DictSource::Path(path.as_ref().to_path_buf()),
            ..Config::default()
        })
    }

    /// Build a `Jieba` from an explicit [`Config`].
    pub fn with_config(config: Config) -> Result<Self> {
        let lexicon = loader::load(&config, &config.dictionary)?;
        Ok(Self {
            lexicon: RwLock::new(lexicon),
            config: Mutex::new(config),
        })
    }

    /// An instance with an empty lexicon: no words, no HMM recovery target
    /// except single characters. Useful for tests exercising the mutation
    /// API in isolation (§4.8, testable property 9).
    pub fn empty() -> Self {
        Self {
            lexicon: RwLock::new(Lexicon::new()),
            config: Mutex::new(Config::default()),
        }
    }

    /// Replace the dictionary wholesale (§4.7 `set_dictionary`): reloads
    /// from `path` under the exclusive lock.
    pub fn set_dictionary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut config = self.config.lock().unwrap();
        config.dictionary = DictSource::Path(path.as_ref().to_path_buf());
        let fresh = loader::load(&config, &config.dictionary)?;
        *self.lexicon.write().unwrap() = fresh;
        Ok(())
    }

    /// Re-run dictionary loading against the current configuration.
    pub fn initialize(&self) -> Result<()> {
        let config = self.config.lock().unwrap();
        let fresh = loader::load(&config, &config.dictionary)?;
        *self.lexicon.write().unwrap() = fresh;
        Ok(())
    }

    /// Lazy full/precise segmentation (§4.5, §6). Materialize with
    /// `.collect::<Vec<_>>()`, or use [`Jieba::lcut`] for the common case.
    pub fn cut<'a>(&'a self, text: &'a str, cut_all: bool, use_hmm: bool) -> impl Iterator<Item = String> + 'a {
        let lexicon = self.lexicon.read().unwrap();
        // The driver is eager internally (§9 notes this is future work for
        // a fully streaming implementation); the public surface is still a
        // lazy iterator so callers stopping early never pay for the tail.
        driver::cut(&lexicon, text, cut_all, use_hmm).into_iter()
    }

    /// Eager convenience wrapper around [`Jieba::cut`], mirroring jieba's
    /// `lcut`.
    pub fn lcut(&self, text: &str, cut_all: bool, use_hmm: bool) -> Vec<String> {
        self.cut(text, cut_all, use_hmm).collect()
    }

    /// Lazy search-mode segmentation (§4.6).
    pub fn cut_for_search<'a>(&'a self, text: &'a str, use_hmm: bool) -> impl Iterator<Item = String> + 'a {
        let lexicon = self.lexicon.read().unwrap();
        driver::cut_for_search(&lexicon, text, use_hmm).into_iter()
    }

    /// Eager convenience wrapper around [`Jieba::cut_for_search`].
    pub fn lcut_for_search(&self, text: &str, use_hmm: bool) -> Vec<String> {
        self.cut_for_search(text, use_hmm).collect()
    }

    /// Position-bearing tokenize (§4.6): `(word, start, end)` code-point
    /// offsets into `text`.
    pub fn tokenize(&self, text: &str, mode: TokenizeMode, use_hmm: bool) -> Vec<Token> {
        let lexicon = self.lexicon.read().unwrap();
        driver::tokenize(&lexicon, text, mode, use_hmm)
    }

    /// Add a word to the lexicon (§4.7).
    pub fn add_word(&self, word: &str, freq: Option<u32>, tag: Option<&str>) -> u32 {
        self.lexicon.write().unwrap().add_word(word, freq, tag)
    }

    /// Remove a word from the lexicon (§4.7): equivalent to `add_word(word,
    /// Some(0), None)`, which also forces `word`'s characters apart in HMM
    /// output.
    pub fn del_word(&self, word: &str) {
        self.lexicon.write().unwrap().del_word(word);
    }

    /// Suggest (and optionally apply) a frequency for `segment` (§4.7).
    pub fn suggest_freq(&self, segment: Segment<'_>, tune: bool) -> u32 {
        self.lexicon.write().unwrap().suggest_freq(segment, tune)
    }

    /// Load a user dictionary, applying each entry via `add_word` (§4.7).
    pub fn load_userdict<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut lexicon = self.lexicon.write().unwrap();
        loader::load_userdict_into(&mut lexicon, path.as_ref())
    }

    /// The number of keys (words plus prefix sentinels) currently held.
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.read().unwrap().len()
    }
}

static DEFAULT: OnceCell<Jieba> = OnceCell::new();

fn default_instance() -> &'static Jieba {
    DEFAULT.get_or_init(|| Jieba::new().expect("bundled default dictionary must load"))
}

/// Segment `text` using the process-wide default instance (§4.8).
pub fn cut(text: &str, cut_all: bool, use_hmm: bool) -> Vec<String> {
    default_instance().lcut(text, cut_all, use_hmm)
}

/// Search-mode segment `text` using the process-wide default instance.
pub fn cut_for_search(text: &str, use_hmm: bool) -> Vec<String> {
    default_instance().lcut_for_search(text, use_hmm)
}

/// Tokenize `text` using the process-wide default instance.
pub fn tokenize(text: &str, mode: TokenizeMode, use_hmm: bool) -> Vec<Token> {
    default_instance().tokenize(text, mode, use_hmm)
}

/// Add a word to the process-wide default instance.
pub fn add_word(word: &str, freq: Option<u32>, tag: Option<&str>) -> u32 {
    default_instance().add_word(word, freq, tag)
}

/// Remove a word from the process-wide default instance.
pub fn del_word(word: &str) {
    default_instance().del_word(word);
}
