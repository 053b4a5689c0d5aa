//! In-memory store for tests and embedded hosts.

use std::collections::HashMap;

use crate::errors::EngineError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), EngineError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), EngineError> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.set("k", "v2").expect("overwrite");
        assert_eq!(store.get("k").as_deref(), Some("v2"));

        store.remove("k").expect("remove");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut store = MemoryStore::new();
        store.set("a", "1").expect("set");
        store.set("b", "2").expect("set");
        store.clear().expect("clear");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
    }
}
