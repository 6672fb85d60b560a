//! Process-scoped session state.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use profsync_store::{DocumentStore, StoreError, StorePath, TypedReader, TypedWriter};
use profsync_types::UserPreferences;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{DacConfig, FilePaths, ReadinessGate};

/// Shared interior of a session handle.
///
/// Holds everything the original design kept in ambient globals - the
/// readiness flag and the two preference caches - as explicit state with a
/// defined initialization (unset/false) and defined update triggers
/// (bootstrap completion, scheduled refresh, the writer's own preference
/// writes).
pub(crate) struct DacInner<S> {
    pub(crate) store: Arc<Mutex<S>>,
    pub(crate) config: DacConfig,
    pub(crate) paths: FilePaths,
    pub(crate) gate: ReadinessGate,
    pub(crate) bootstrapped: AtomicBool,
    /// Cached shared (cross-writer) preferences.
    pub(crate) shared_prefs: Mutex<Option<UserPreferences>>,
    /// Cached preferences of this writer.
    pub(crate) scoped_prefs: Mutex<Option<UserPreferences>>,
}

impl<S: DocumentStore> DacInner<S> {
    pub(crate) fn new(store: Arc<Mutex<S>>, config: DacConfig, paths: FilePaths) -> Self {
        Self {
            store,
            config,
            paths,
            gate: ReadinessGate::new(),
            bootstrapped: AtomicBool::new(false),
            shared_prefs: Mutex::new(None),
            scoped_prefs: Mutex::new(None),
        }
    }

    // Every storage call below takes and releases the store lock on its
    // own. Each call is a suspension point: other sessions sharing the same
    // backend may interleave between two consecutive calls, which is
    // exactly the exposure the index read-modify-write accepts.

    pub(crate) async fn get_doc_as<T>(&self, path: &StorePath) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned + Send,
    {
        log::debug!("downloading document at {}", path);
        self.store.lock().await.get_as(path).await
    }

    pub(crate) async fn set_doc_as<T>(&self, path: &StorePath, doc: &T) -> Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        log::debug!("updating document at {}", path);
        self.store.lock().await.set_as(path, doc).await
    }

    pub(crate) async fn get_raw(&self, path: &StorePath) -> Result<Option<Bytes>, StoreError> {
        self.store.lock().await.get_entry(path).await
    }

    pub(crate) async fn set_raw(&self, path: &StorePath, data: Bytes) -> Result<(), StoreError> {
        self.store.lock().await.set_entry(path, data).await
    }
}

/// Current unix time in milliseconds, `0` if the clock is before the epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
