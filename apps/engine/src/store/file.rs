//! File-backed store: one JSON object of key-value pairs, rewritten in full
//! on every mutation. Matches the blocking, last-write-wins model the
//! engine assumes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::EngineError;
use crate::store::StateStore;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store, reading any existing file. A missing, unreadable,
    /// or corrupt file starts empty and is rebuilt on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), "corrupt store file, starting empty: {e}");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), "unreadable store file, starting empty: {e}");
                HashMap::new()
            }
        };
        info!(path = %path.display(), keys = entries.len(), "state store opened");
        FileStore { path, entries }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::open(&config.state_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), EngineError> {
        let blob = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), EngineError> {
        self.entries.remove(key);
        self.persist()
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        self.entries.clear();
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path);
        store.set("qpwonState", r#"{"language":"it"}"#).expect("set");
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get("qpwonState").as_deref(),
            Some(r#"{"language":"it"}"#)
        );
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty_and_recovers_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(&path, "### not json ###").expect("seed corrupt file");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("k"), None);

        store.set("k", "v").expect("set");
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_unreadable_file_starts_empty() {
        // A directory at the store path makes the read fail with something
        // other than NotFound.
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::create_dir(&path).expect("seed a directory at the store path");

        let store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_clear_persists_an_empty_map() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path);
        store.set("a", "1").expect("set");
        store.clear().expect("clear");
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("a"), None);
    }
}
