//! Dictionary Loader / Cache (§4.1): turns a line-oriented lexicon text file
//! (or the bundled default) into a [`Lexicon`], with a binary cache in the
//! configured temp directory to skip re-parsing on repeat loads.

use crate::config::{Config, DictSource};
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// What actually gets cached: the frequency map and the total, the two
/// fields needed to reconstruct a [`Lexicon`] (§6: "a pair `(freq_map,
/// total)`").
#[derive(Debug, Serialize, Deserialize)]
struct CachePayload {
    freq: HashMap<String, u32>,
    total: u64,
}

/// Process-global path-keyed lock so that concurrent loads of the same
/// dictionary source (across separate `Jieba` instances in one process)
/// don't race to write the same cache file (§4.1 "Concurrency").
static LOAD_LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn lock_for(key: &Path) -> Arc<Mutex<()>> {
    let mut locks = LOAD_LOCKS.lock().unwrap();
    locks
        .entry(key.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// A lock key standing in for the bundled default, which has no filesystem
/// path of its own.
fn default_lock_key() -> PathBuf {
    PathBuf::from("\0jieba-default-dictionary")
}

fn cache_path(config: &Config, source: &DictSource) -> PathBuf {
    if let Some(explicit) = &config.cache_file {
        return explicit.clone();
    }
    let dir = config.resolved_tmp_dir();
    match source {
        DictSource::Default => dir.join("jieba.cache"),
        DictSource::Path(p) => {
            let digest = md5::compute(p.to_string_lossy().as_bytes());
            dir.join(format!("jieba.u{:x}.cache", digest))
        }
    }
}

/// Parse `text` (the contents of a dictionary file or the bundled default)
/// into `lexicon`, per the `<word> <freq>[ <tag>]` format (§4.1).
///
/// `label` is used only for error messages (the source file path, or a
/// fixed string for the bundled default).
fn parse_into(lexicon: &mut Lexicon, text: &str, label: &str) -> Result<u64> {
    let mut total: u64 = 0;
    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let word = fields.next().ok_or_else(|| Error::InvalidDictEntry {
            file: label.to_string(),
            line: lineno + 1,
            text: raw_line.to_string(),
        })?;
        let freq: u32 = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| Error::InvalidDictEntry {
                file: label.to_string(),
                line: lineno + 1,
                text: raw_line.to_string(),
            })?;
        let tag = fields.next();

        lexicon.insert_raw(word.to_string(), freq);
        total += freq as u64;
        if let Some(tag) = tag {
            lexicon.set_tag(word, tag);
        }
    }
    Ok(total)
}

fn read_source_text(source: &DictSource) -> Result<String> {
    match source {
        DictSource::Default => Ok(crate::data::DEFAULT_DICT.to_string()),
        DictSource::Path(path) => {
            if !path.exists() {
                return Err(Error::DictNotFound { path: path.clone() });
            }
            let bytes = fs::read(path).map_err(|_| Error::DictNotFound { path: path.clone() })?;
            String::from_utf8(bytes).map_err(|_| Error::DictNotUtf8 {
                file: path.to_string_lossy().to_string(),
            })
        }
    }
}

fn source_label(source: &DictSource) -> String {
    match source {
        DictSource::Default => "<bundled default dictionary>".to_string(),
        DictSource::Path(p) => p.to_string_lossy().to_string(),
    }
}

fn cache_is_fresh(cache: &Path, source: &DictSource) -> bool {
    let Ok(cache_meta) = fs::metadata(cache) else {
        return false;
    };
    match source {
        DictSource::Default => true,
        DictSource::Path(p) => {
            let (Ok(cache_mtime), Ok(src_meta)) = (cache_meta.modified(), fs::metadata(p)) else {
                return false;
            };
            let Ok(src_mtime) = src_meta.modified() else {
                return false;
            };
            cache_mtime > src_mtime
        }
    }
}

fn load_from_cache(cache: &Path) -> Option<(HashMap<String, u32>, u64)> {
    let bytes = fs::read(cache).ok()?;
    let payload: CachePayload = bincode::deserialize(&bytes).ok()?;
    Some((payload.freq, payload.total))
}

/// Write `payload` to `cache` via `tempfile + rename` so a partial file is
/// never observable to a concurrent reader (§4.1 step 3, §5).
fn write_cache_atomic(cache: &Path, payload: &CachePayload) -> Result<()> {
    let dir = cache.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| Error::CacheWriteFailed {
        path: cache.to_path_buf(),
        source: e,
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::CacheWriteFailed {
        path: cache.to_path_buf(),
        source: e,
    })?;
    let encoded = bincode::serialize(payload).expect("CachePayload is always serializable");
    tmp.write_all(&encoded).map_err(|e| Error::CacheWriteFailed {
        path: cache.to_path_buf(),
        source: e,
    })?;
    match tmp.persist(cache) {
        Ok(_) => Ok(()),
        Err(persist_err) => {
            // Cross-device rename: fall back to copy-then-unlink.
            let tmp_path = persist_err.file.path().to_path_buf();
            fs::copy(&tmp_path, cache).map_err(|e| Error::CacheWriteFailed {
                path: cache.to_path_buf(),
                source: e,
            })?;
            let _ = fs::remove_file(&tmp_path);
            Ok(())
        }
    }
}

/// Build a [`Lexicon`] from `source`, using the cache at the path the
/// configuration resolves to when it is fresh (§4.1).
pub fn load(config: &Config, source: &DictSource) -> Result<Lexicon> {
    let start = Instant::now();
    let label = source_label(source);
    tracing::debug!(dictionary = %label, "loading dictionary");

    let lock_key = match source {
        DictSource::Default => default_lock_key(),
        DictSource::Path(p) => p.clone(),
    };
    let guard = lock_for(&lock_key);
    let _held = guard.lock().unwrap();

    let cache = cache_path(config, source);
    let mut lexicon = Lexicon::new();

    if cache_is_fresh(&cache, source) {
        if let Some((freq, total)) = load_from_cache(&cache) {
            lexicon.load_raw(freq, total);
            tracing::debug!(
                dictionary = %label,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "loaded dictionary from cache"
            );
            return Ok(lexicon);
        }
        tracing::warn!(cache = %cache.display(), "cache present but unreadable, rebuilding");
    }

    let text = read_source_text(source)?;
    let total = parse_into(&mut lexicon, &text, &label)?;
    lexicon.set_total(total);

    let payload = CachePayload {
        freq: lexicon.snapshot_freq(),
        total,
    };
    if let Err(e) = write_cache_atomic(&cache, &payload) {
        tracing::warn!(error = %e, cache = %cache.display(), "failed to write dictionary cache");
    }

    tracing::debug!(
        dictionary = %label,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "loaded dictionary from source text"
    );
    Ok(lexicon)
}

/// Load a user dictionary into an already-initialized lexicon (§4.7).
/// Same line format as the main dictionary; each entry is applied through
/// [`Lexicon::add_word`] rather than `insert_raw`, so existing frequencies
/// are replaced and `total` stays consistent.
pub fn load_userdict_into(lexicon: &mut Lexicon, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::DictNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|_| Error::DictNotFound {
        path: path.to_path_buf(),
    })?;
    let text = String::from_utf8(bytes).map_err(|_| Error::DictNotUtf8 {
        file: path.to_string_lossy().to_string(),
    })?;
    let label = path.to_string_lossy().to_string();

    for (lineno, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let word = fields.next().ok_or_else(|| Error::InvalidDictEntry {
            file: label.clone(),
            line: lineno + 1,
            text: raw_line.to_string(),
        })?;
        let freq = match fields.next() {
            Some(f) => Some(f.parse::<u32>().map_err(|_| Error::InvalidDictEntry {
                file: label.clone(),
                line: lineno + 1,
                text: raw_line.to_string(),
            })?),
            None => None,
        };
        let tag = fields.next();
        lexicon.add_word(word, freq, tag);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_the_bundled_default_dictionary() {
        let config = Config::default();
        let lexicon = load(&config, &DictSource::Default).unwrap();
        assert!(lexicon.freq("的") > 0);
        assert!(lexicon.freq("清华大学") > 0);
        assert!(lexicon.total() > 0);
    }

    #[test]
    fn malformed_line_reports_file_and_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "good 1\nbadline\n").unwrap();
        let config = Config {
            tmp_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let err = load(&config, &DictSource::Path(path)).unwrap_err();
        match err {
            Error::InvalidDictEntry { line, .. } => assert_eq!(line, 2),
            other => panic!("expected InvalidDictEntry, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_dict_not_found() {
        let config = Config::default();
        let err = load(&config, &DictSource::Path(PathBuf::from("/no/such/file.txt"))).unwrap_err();
        assert!(matches!(err, Error::DictNotFound { .. }));
    }

    #[test]
    fn cache_round_trip_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.txt");
        fs::write(&path, "我 100\n你好 50\n").unwrap();
        let config = Config {
            tmp_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let source = DictSource::Path(path);
        let first = load(&config, &source).unwrap();
        let second = load(&config, &source).unwrap();
        assert_eq!(first.snapshot_freq(), second.snapshot_freq());
        assert_eq!(first.total(), second.total());
    }

    #[test]
    fn cache_write_failure_does_not_fail_initialization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.txt");
        fs::write(&path, "我 100\n").unwrap();
        // Point tmp_dir at a path that can never be created as a directory
        // (its parent component is a plain file, not a directory).
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"x").unwrap();
        let config = Config {
            tmp_dir: Some(blocker.join("nested")),
            ..Config::default()
        };
        let result = load(&config, &DictSource::Path(path));
        assert!(result.is_ok());
    }
}
