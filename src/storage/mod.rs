//! Storage interface for chain state
//!
//! The ledger core never touches durable storage itself; a collaborator
//! persists raw block and transaction bytes behind this trait and is passed
//! into whatever assembly or validation code needs it. There is no
//! process-wide store.

use std::collections::HashMap;

/// Byte-oriented key-value store for raw block/transaction bytes
pub trait KeyValueStore {
    /// Fetch the value for `key`, if present
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&mut self, key: &[u8], value: Vec<u8>);
}

/// In-memory store backed by a hash map
///
/// The concrete store for tests and single-process callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &[u8], value: Vec<u8>) {
        self.entries.insert(key.to_vec(), value);
    }
}
