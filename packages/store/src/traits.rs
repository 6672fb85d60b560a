//! Async traits for the storage substrate.
//!
//! Two access planes share one key space:
//! - documents: JSON values read and written whole
//! - entries: raw byte strings for small, frequently rewritten records
//!
//! All traits are object-safe, so `Box<dyn DocumentStore>` works. Reads
//! return `Ok(None)` when the key does not exist; backends are allowed to be
//! slow in that case, which callers mitigate by pre-creating expected keys.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{StoreError, StorePath};

/// Read a JSON document from a key.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Download the document at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - the key does not exist (not an error condition).
    /// * `Ok(Some(value))` - the document at the key.
    /// * `Err(StoreError)` - a transport or backend error occurred.
    async fn get_doc(&mut self, path: &StorePath) -> Result<Option<Value>, StoreError>;
}

/// Write a JSON document to a key.
#[async_trait]
pub trait DocumentWriter: Send + Sync {
    /// Upload `doc` at `path`, replacing any previous document.
    async fn set_doc(&mut self, path: &StorePath, doc: Value) -> Result<(), StoreError>;
}

/// Read a raw byte entry from a key.
#[async_trait]
pub trait EntryReader: Send + Sync {
    /// Download the raw entry at `path`, `Ok(None)` when absent.
    async fn get_entry(&mut self, path: &StorePath) -> Result<Option<Bytes>, StoreError>;
}

/// Write a raw byte entry to a key.
#[async_trait]
pub trait EntryWriter: Send + Sync {
    /// Upload `data` at `path`, replacing any previous entry.
    async fn set_entry(&mut self, path: &StorePath, data: Bytes) -> Result<(), StoreError>;
}

/// Combined document and entry access.
///
/// Automatically implemented for any type providing all four base traits.
pub trait DocumentStore: DocumentReader + DocumentWriter + EntryReader + EntryWriter {}
impl<T: DocumentReader + DocumentWriter + EntryReader + EntryWriter> DocumentStore for T {}

// Blanket implementations for references and boxes

#[async_trait]
impl<T: DocumentReader + ?Sized> DocumentReader for &mut T {
    async fn get_doc(&mut self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        (*self).get_doc(path).await
    }
}

#[async_trait]
impl<T: DocumentWriter + ?Sized> DocumentWriter for &mut T {
    async fn set_doc(&mut self, path: &StorePath, doc: Value) -> Result<(), StoreError> {
        (*self).set_doc(path, doc).await
    }
}

#[async_trait]
impl<T: EntryReader + ?Sized> EntryReader for &mut T {
    async fn get_entry(&mut self, path: &StorePath) -> Result<Option<Bytes>, StoreError> {
        (*self).get_entry(path).await
    }
}

#[async_trait]
impl<T: EntryWriter + ?Sized> EntryWriter for &mut T {
    async fn set_entry(&mut self, path: &StorePath, data: Bytes) -> Result<(), StoreError> {
        (*self).set_entry(path, data).await
    }
}

#[async_trait]
impl<T: DocumentReader + ?Sized> DocumentReader for Box<T> {
    async fn get_doc(&mut self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        self.as_mut().get_doc(path).await
    }
}

#[async_trait]
impl<T: DocumentWriter + ?Sized> DocumentWriter for Box<T> {
    async fn set_doc(&mut self, path: &StorePath, doc: Value) -> Result<(), StoreError> {
        self.as_mut().set_doc(path, doc).await
    }
}

#[async_trait]
impl<T: EntryReader + ?Sized> EntryReader for Box<T> {
    async fn get_entry(&mut self, path: &StorePath) -> Result<Option<Bytes>, StoreError> {
        self.as_mut().get_entry(path).await
    }
}

#[async_trait]
impl<T: EntryWriter + ?Sized> EntryWriter for Box<T> {
    async fn set_entry(&mut self, path: &StorePath, data: Bytes) -> Result<(), StoreError> {
        self.as_mut().set_entry(path, data).await
    }
}

/// Extension trait for typed reads.
///
/// Automatically implemented for all `DocumentReader` implementations.
///
/// # Example
///
/// ```rust,ignore
/// use profsync_store::{TypedReader, store_path};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Prefs {
///     darkmode: bool,
/// }
///
/// async fn read_prefs(store: &mut dyn DocumentReader) -> Result<Option<Prefs>, StoreError> {
///     store.get_as(&store_path!("skyuser.hns/preferences.json")).await
/// }
/// ```
#[async_trait]
pub trait TypedReader: DocumentReader {
    /// Download a document and deserialize it into a Rust type.
    async fn get_as<T>(&mut self, path: &StorePath) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned + Send,
    {
        let Some(value) = self.get_doc(path).await? else {
            return Ok(None);
        };

        let typed = serde_json::from_value(value).map_err(|e| StoreError::Deserialization {
            message: e.to_string(),
        })?;
        Ok(Some(typed))
    }
}

impl<R: DocumentReader + ?Sized> TypedReader for R {}

/// Extension trait for typed writes.
///
/// Automatically implemented for all `DocumentWriter` implementations.
#[async_trait]
pub trait TypedWriter: DocumentWriter {
    /// Serialize a Rust type and upload it as a document.
    async fn set_as<T>(&mut self, path: &StorePath, data: &T) -> Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(data).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;
        self.set_doc(path, value).await
    }
}

impl<W: DocumentWriter + ?Sized> TypedWriter for W {}
