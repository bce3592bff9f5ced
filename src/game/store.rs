//! Durable key/value storage for the player profile
//!
//! Values are stored as JSON text under their logical key name. Storage
//! failures are never fatal: callers log them and keep their in-memory state.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Application directory name under the platform data dir
const APP_DIR: &str = "quotle";

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value persistence backend
pub trait Store {
    /// Read the raw JSON text stored under `key`, if any
    ///
    /// # Errors
    /// Returns `StoreError` if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store raw JSON text under `key`
    ///
    /// # Errors
    /// Returns `StoreError` if the value cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// Volatile store, used for `--no-save` and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Raw value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Profile kept as one JSON object file
///
/// The whole file is read once at open and rewritten on every save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Default profile location in the platform data directory
    #[must_use]
    pub fn default_path() -> PathBuf {
        data_dir().join("profile.json")
    }

    /// Open the profile at `path`
    ///
    /// A missing file starts an empty profile. An unreadable or corrupt file
    /// is logged and also starts empty; the next save replaces it.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(err) => {
                warn!(error = %err, "profile unreadable, starting with defaults");
                Map::new()
            }
        };
        debug!(path = %path.display(), keys = values.len(), "profile opened");
        Self { path, values }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json).map_err(write_err)
    }
}

fn read_values(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(values)) => Ok(values),
        Ok(_) => {
            warn!(path = %path.display(), "profile is not a JSON object, ignoring");
            Ok(Map::new())
        }
        Err(err) => Err(err.into()),
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).map(Value::to_string))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Keep non-JSON text as a string rather than dropping it
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

/// Directory holding the profile and log file
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
