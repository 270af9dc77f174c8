//! Key/value persistence for high scores.
//!
//! Each value is a single non-negative integer stored as its decimal string
//! under a fixed key, the same shape as browser local storage.

use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for score store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying I/O failed.
    Io { key: String, source: io::Error },
    /// Stored value is not a non-negative integer.
    Parse { key: String, value: String },
    /// Key contains characters that cannot be used as a storage name.
    InvalidKey(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io { key, source } => write!(f, "I/O error for key '{}': {}", key, source),
            StoreError::Parse { key, value } => {
                write!(f, "Value '{}' stored under '{}' is not a score", value, key)
            }
            StoreError::InvalidKey(key) => write!(f, "Invalid store key '{}'", key),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Persistent integer store.
pub trait ScoreStore {
    /// Read the value under `key`. `Ok(None)` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Write `value` under `key`.
    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

fn parse_value(key: &str, raw: &str) -> Result<u32, StoreError> {
    raw.trim().parse::<u32>().map_err(|_| StoreError::Parse {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// In-memory store. Values live as long as the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw string, bypassing validation.
    pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(key.into(), raw.into());
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        self.values.get(key).map(|raw| parse_value(key, raw)).transpose()
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by one file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for storage. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl ScoreStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => parse_value(key, &raw).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source: io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(path, value.to_string()).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("arcade-engine-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("snakeHighScore").unwrap(), None);
        store.save("snakeHighScore", 120).unwrap();
        assert_eq!(store.load("snakeHighScore").unwrap(), Some(120));
    }

    #[test]
    fn test_memory_store_parse_error() {
        let mut store = MemoryStore::new();
        store.insert_raw("snakeHighScore", "lots");
        let err = store.load("snakeHighScore").unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = temp_dir("roundtrip");
        let mut store = FileStore::new(&dir);

        assert_eq!(store.load("snakeHighScore").unwrap(), None);
        store.save("snakeHighScore", 340).unwrap();
        assert_eq!(store.load("snakeHighScore").unwrap(), Some(340));
        assert_eq!(fs::read_to_string(dir.join("snakeHighScore")).unwrap(), "340");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let store = FileStore::new(temp_dir("keys"));
        assert!(matches!(store.load("../escape"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.load(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err = StoreError::Io {
            key: "k".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
