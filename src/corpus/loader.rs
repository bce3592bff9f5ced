//! Corpus loading
//!
//! Reads the quote corpus from the embedded data or a JSON file. Loading is
//! single-flight: the first caller performs the read, concurrent callers wait
//! for it and share the same corpus. A failed load is not remembered, so the
//! next call retries.

use super::{Corpus, EMBEDDED_QUOTES, QuoteRecord};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure to obtain the corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read corpus file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse corpus: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk layout: quotes live under a `results` array
#[derive(Deserialize)]
struct CorpusFile {
    results: Vec<QuoteRecord>,
}

/// Parse a corpus from its JSON text
///
/// # Errors
///
/// Returns `CorpusError::Parse` if the text is not a valid corpus document.
///
/// # Examples
/// ```
/// use quotle::corpus::loader::parse_corpus;
///
/// let json = r#"{"results": [{"id": "1", "quote": "Hello there friend", "person": "Ann", "episode": "Pilot"}]}"#;
/// let corpus = parse_corpus(json).unwrap();
/// assert_eq!(corpus.len(), 1);
/// ```
pub fn parse_corpus(json: &str) -> Result<Corpus, CorpusError> {
    let file: CorpusFile = serde_json::from_str(json)?;
    Ok(Corpus::new(file.results))
}

/// Load a corpus from a JSON file
///
/// # Errors
///
/// Returns `CorpusError::Io` if the file cannot be read, or
/// `CorpusError::Parse` if its contents are malformed.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Corpus, CorpusError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_corpus(&content)
}

/// Where the corpus comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// The corpus compiled into the binary
    Embedded,
    /// A JSON file on disk
    File(PathBuf),
}

impl CorpusSource {
    fn read(&self) -> Result<Corpus, CorpusError> {
        match self {
            Self::Embedded => parse_corpus(EMBEDDED_QUOTES),
            Self::File(path) => load_from_file(path),
        }
    }
}

/// Lazily loads and memoises the corpus
pub struct CorpusLoader {
    source: CorpusSource,
    cache: Mutex<Option<Arc<Corpus>>>,
}

impl CorpusLoader {
    #[must_use]
    pub const fn new(source: CorpusSource) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &CorpusSource {
        &self.source
    }

    /// Get the corpus, loading it on first use
    ///
    /// The lock is held for the duration of the read, so callers racing the
    /// first load block until it finishes instead of reading again.
    ///
    /// # Errors
    ///
    /// Returns the `CorpusError` of this attempt. The failure is not cached.
    pub fn load(&self) -> Result<Arc<Corpus>, CorpusError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(corpus) = cache.as_ref() {
            debug!("corpus already loaded");
            return Ok(Arc::clone(corpus));
        }

        match self.source.read() {
            Ok(corpus) => {
                info!(source = ?self.source, quotes = corpus.len(), "corpus loaded");
                let corpus = Arc::new(corpus);
                *cache = Some(Arc::clone(&corpus));
                Ok(corpus)
            }
            Err(err) => {
                warn!(source = ?self.source, error = %err, "corpus unavailable");
                Err(err)
            }
        }
    }

    /// Whether a corpus has been loaded successfully
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quotle-{}-{name}", std::process::id()))
    }

    #[test]
    fn parse_corpus_maps_fields() {
        let json = r#"{"results": [
            {"id": "3", "quote": "A slim chance indeed", "person": "Ann", "episode": "Pilot",
             "image": null, "episode_quote_sequence": "1", "global_quote_sequence": "9"}
        ]}"#;
        let corpus = parse_corpus(json).unwrap();
        let quote = corpus.get("3").unwrap();
        assert_eq!(quote.text, "A slim chance indeed");
        assert_eq!(quote.person, "Ann");
        assert_eq!(quote.episode, "Pilot");
    }

    #[test]
    fn parse_corpus_rejects_garbage() {
        assert!(matches!(parse_corpus("not json"), Err(CorpusError::Parse(_))));
        assert!(matches!(parse_corpus(r#"{"quotes": []}"#), Err(CorpusError::Parse(_))));
    }

    #[test]
    fn load_embedded() {
        let loader = CorpusLoader::new(CorpusSource::Embedded);
        assert!(!loader.is_loaded());
        let corpus = loader.load().unwrap();
        assert!(!corpus.is_empty());
        assert!(loader.is_loaded());
    }

    #[test]
    fn load_is_memoised() {
        let loader = CorpusLoader::new(CorpusSource::Embedded);
        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn concurrent_loads_share_one_corpus() {
        let loader = CorpusLoader::new(CorpusSource::Embedded);

        let loaded: Vec<Arc<Corpus>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| loader.load().unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for corpus in &loaded[1..] {
            assert!(Arc::ptr_eq(&loaded[0], corpus));
        }
    }

    #[test]
    fn failed_load_is_retried() {
        let path = temp_path("retry.json");
        let _ = fs::remove_file(&path);

        let loader = CorpusLoader::new(CorpusSource::File(path.clone()));
        assert!(matches!(loader.load(), Err(CorpusError::Io { .. })));
        assert!(!loader.is_loaded());

        fs::write(
            &path,
            r#"{"results": [{"id": "1", "quote": "Now it works fine", "person": "Ann", "episode": "Pilot"}]}"#,
        )
        .unwrap();
        let corpus = loader.load().unwrap();
        assert_eq!(corpus.len(), 1);

        let _ = fs::remove_file(&path);
    }
}
