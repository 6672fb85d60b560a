//! In-memory store backend.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::{DocumentReader, DocumentWriter, EntryReader, EntryWriter, StoreError, StorePath};

/// An in-memory store keeping documents and raw entries in two maps.
///
/// Useful for tests and for single-process setups. Wrap it in
/// `Arc<tokio::sync::Mutex<_>>` to share one backend between several
/// sessions, which is how cross-writer behavior is exercised in tests.
///
/// # Example
///
/// ```rust,ignore
/// use profsync_store::{DocumentReader, DocumentWriter, InMemoryStore, store_path};
///
/// let mut store = InMemoryStore::new();
/// store.set_doc(&store_path!("k"), serde_json::json!({"a": 1})).await?;
/// assert!(store.get_doc(&store_path!("k")).await?.is_some());
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    docs: HashMap<StorePath, Value>,
    entries: HashMap<StorePath, Bytes>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Direct lookup without going through the async trait, for assertions.
    pub fn peek_doc(&self, path: &StorePath) -> Option<&Value> {
        self.docs.get(path)
    }

    /// Direct raw-entry lookup, for assertions.
    pub fn peek_entry(&self, path: &StorePath) -> Option<&Bytes> {
        self.entries.get(path)
    }
}

#[async_trait]
impl DocumentReader for InMemoryStore {
    async fn get_doc(&mut self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        log::debug!("downloading document at {}", path);
        Ok(self.docs.get(path).cloned())
    }
}

#[async_trait]
impl DocumentWriter for InMemoryStore {
    async fn set_doc(&mut self, path: &StorePath, doc: Value) -> Result<(), StoreError> {
        log::debug!("updating document at {}", path);
        self.docs.insert(path.clone(), doc);
        Ok(())
    }
}

#[async_trait]
impl EntryReader for InMemoryStore {
    async fn get_entry(&mut self, path: &StorePath) -> Result<Option<Bytes>, StoreError> {
        Ok(self.entries.get(path).cloned())
    }
}

#[async_trait]
impl EntryWriter for InMemoryStore {
    async fn set_entry(&mut self, path: &StorePath, data: Bytes) -> Result<(), StoreError> {
        self.entries.insert(path.clone(), data);
        Ok(())
    }
}
