//! Local-disk store backend.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tokio::fs;

use crate::{DocumentReader, DocumentWriter, EntryReader, EntryWriter, StoreError, StorePath};

/// A store persisting documents as JSON files under a root directory.
///
/// Store key components map one-to-one onto file system path components, so
/// `skyuser.hns/skyapp.hns/userprofile.json` lands at that relative path
/// under the root. Documents and raw entries share the file tree; the key
/// layouts used by profsync never point both planes at the same key.
pub struct LocalDiskStore {
    root: PathBuf,
}

impl LocalDiskStore {
    /// Open a store rooted at an existing, writable directory.
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        let attr = std::fs::metadata(&root).map_err(|e| StoreError::Backend {
            message: format!("root path {} is not accessible: {}", root.display(), e),
        })?;

        if !attr.is_dir() {
            return Err(StoreError::Backend {
                message: format!("root path {} must be a directory", root.display()),
            });
        }

        if attr.permissions().readonly() {
            return Err(StoreError::Backend {
                message: format!("root directory {} must be writable", root.display()),
            });
        }

        Ok(Self { root })
    }

    fn file_path(&self, path: &StorePath) -> PathBuf {
        let mut file_path = self.root.clone();
        for component in path.iter() {
            file_path.push(component);
        }
        file_path
    }

    async fn read_file(&self, path: &StorePath) -> Result<Option<Vec<u8>>, StoreError> {
        let file_path = self.file_path(path);
        log::debug!("reading {}", file_path.display());

        match fs::read(&file_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::backend(e)),
        }
    }

    async fn write_file(&self, path: &StorePath, data: &[u8]) -> Result<(), StoreError> {
        let file_path = self.file_path(path);
        log::debug!("writing {}", file_path.display());

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(StoreError::backend)?;
        }
        fs::write(&file_path, data).await.map_err(StoreError::backend)
    }
}

#[async_trait]
impl DocumentReader for LocalDiskStore {
    async fn get_doc(&mut self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let Some(data) = self.read_file(path).await? else {
            return Ok(None);
        };

        let value = serde_json::from_slice(&data).map_err(|e| StoreError::Deserialization {
            message: format!("{} at {}", e, path),
        })?;
        Ok(Some(value))
    }
}

#[async_trait]
impl DocumentWriter for LocalDiskStore {
    async fn set_doc(&mut self, path: &StorePath, doc: Value) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&doc).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;
        self.write_file(path, &data).await
    }
}

#[async_trait]
impl EntryReader for LocalDiskStore {
    async fn get_entry(&mut self, path: &StorePath) -> Result<Option<Bytes>, StoreError> {
        Ok(self.read_file(path).await?.map(Bytes::from))
    }
}

#[async_trait]
impl EntryWriter for LocalDiskStore {
    async fn set_entry(&mut self, path: &StorePath, data: Bytes) -> Result<(), StoreError> {
        self.write_file(path, &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store_path;

    #[tokio::test]
    async fn document_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalDiskStore::new(dir.path().to_path_buf()).unwrap();

        let key = store_path!("skyuser.hns/skyapp.hns/userprofile.json");
        let doc = serde_json::json!({"version": 1, "username": "alice"});

        store.set_doc(&key, doc.clone()).await.unwrap();
        assert_eq!(store.get_doc(&key).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalDiskStore::new(dir.path().to_path_buf()).unwrap();

        let missing = store
            .get_doc(&store_path!("skyuser.hns/absent.json"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn entry_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalDiskStore::new(dir.path().to_path_buf()).unwrap();

        let key = store_path!("skyuser.hns/userstatus");
        store
            .set_entry(&key, Bytes::from_static(b"None|0"))
            .await
            .unwrap();
        assert_eq!(
            store.get_entry(&key).await.unwrap(),
            Some(Bytes::from_static(b"None|0"))
        );
    }

    #[tokio::test]
    async fn corrupt_document_is_a_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalDiskStore::new(dir.path().to_path_buf()).unwrap();

        let key = store_path!("skyuser.hns/broken.json");
        store
            .set_entry(&key, Bytes::from_static(b"not json"))
            .await
            .unwrap();

        let result = store.get_doc(&key).await;
        assert!(matches!(result, Err(StoreError::Deserialization { .. })));
    }

    #[test]
    fn root_must_be_a_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = LocalDiskStore::new(file.path().to_path_buf());
        assert!(result.is_err());
    }
}
