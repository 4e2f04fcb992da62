//! Implements an in-memory key-value store.

use std::collections::HashMap;

use crate::{Error, storage::KeyValueStore};

/// A key-value store held entirely in memory.
///
/// Nothing survives the process; use [crate::SqliteStore] for durable
/// storage. Useful for tests and for embedders that manage persistence
/// themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}
