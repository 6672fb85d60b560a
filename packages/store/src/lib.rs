//! Storage substrate for profsync.
//!
//! Everything profsync persists lives in a key-addressed document store:
//! - `StorePath`: validated key with slash-separated components
//! - `DocumentReader` / `DocumentWriter`: JSON documents at a path
//! - `EntryReader` / `EntryWriter`: raw byte entries at a path
//! - `TypedReader` / `TypedWriter`: serde-typed access over documents
//!
//! Missing keys are a normal condition, not an error: reads return
//! `Ok(None)`. Backends may be slow on missing keys, which is why callers
//! pre-create expected documents up front.
//!
//! # Example
//!
//! ```rust,ignore
//! use profsync_store::{DocumentReader, StoreError, store_path};
//! use serde_json::Value;
//!
//! async fn read_profile(store: &mut dyn DocumentReader) -> Result<Option<Value>, StoreError> {
//!     store.get_doc(&store_path!("skyuser.hns/userprofile.json")).await
//! }
//! ```

mod disk;
mod error;
mod memory;
mod path;
mod traits;

pub use bytes::Bytes;

pub use disk::LocalDiskStore;
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use path::{PathError, StorePath};
pub use traits::{
    DocumentReader, DocumentStore, DocumentWriter, EntryReader, EntryWriter, TypedReader,
    TypedWriter,
};
