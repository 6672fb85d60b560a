//! Ensure-present bootstrap.
//!
//! Lookups on nonexistent keys are disproportionately slow in the backing
//! store, so the expected documents are pre-created once per session,
//! paying that cost up front instead of on the first interactive call.

use profsync_store::{DocumentStore, StorePath};
use profsync_types::{IndexDocument, StatusRecord, UserPreferences, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::session::DacInner;
use crate::DacError;

/// Idempotently create the shared index documents and both status entries.
///
/// The ensure-tasks run concurrently; individual failures are logged and
/// tolerated. Returns whether at least one ensure-task succeeded - if every
/// one failed the session is left not-ready so a retry can run.
pub(crate) async fn ensure_present<S: DocumentStore>(inner: &DacInner<S>) -> bool {
    let (profile, prefs, status) = tokio::join!(
        ensure_doc::<S, IndexDocument<UserProfile>>(inner, &inner.paths.profile_index),
        ensure_doc::<S, IndexDocument<UserPreferences>>(inner, &inner.paths.preferences_index),
        ensure_status(inner),
    );

    let mut any_ok = false;
    let outcomes = [
        ("profile index", profile),
        ("preferences index", prefs),
        ("status entries", status),
    ];
    for (what, outcome) in outcomes {
        match outcome {
            Ok(()) => any_ok = true,
            Err(e) => log::warn!("failed to ensure {} present: {}", what, e),
        }
    }
    any_ok
}

/// Download a document and create the version-tagged default when absent.
async fn ensure_doc<S, T>(inner: &DacInner<S>, path: &StorePath) -> Result<(), DacError>
where
    S: DocumentStore,
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    let existing: Option<T> = inner.get_doc_as(path).await?;
    if existing.is_none() {
        inner.set_doc_as(path, &T::default()).await?;
        log::debug!("created default document at {}", path);
    }
    Ok(())
}

/// Pre-create the global and writer-scoped presence entries with the
/// offline sentinel.
async fn ensure_status<S: DocumentStore>(inner: &DacInner<S>) -> Result<(), DacError> {
    ensure_entry(inner, &inner.paths.status_global).await?;
    ensure_entry(inner, &inner.paths.status).await?;
    Ok(())
}

async fn ensure_entry<S: DocumentStore>(
    inner: &DacInner<S>,
    path: &StorePath,
) -> Result<(), DacError> {
    let existing = inner.get_raw(path).await?;
    if existing.is_none() {
        inner
            .set_raw(path, StatusRecord::sentinel().encode())
            .await?;
        log::debug!("created sentinel entry at {}", path);
    }
    Ok(())
}
