//! In-memory store

use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use crate::storage::{KeyValueStore, StorageError};

/// In-memory key-value store.
///
/// Clones are handles onto the same map, so the cart and order services can share one
/// store the way browser tabs share local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<FxHashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value);

        Ok(())
    }
}
