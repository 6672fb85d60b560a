//! The index-and-merge engine.
//!
//! Every accepted write lands twice: once at the writer's own scoped key,
//! once in the shared index that points other writers at it. Reads resolve
//! through the index in two hops. Neither path has cross-writer atomicity;
//! the scoped document is the durable copy, the index is the best-effort
//! pointer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use profsync_store::{DocumentStore, StorePath};
use profsync_types::{HistoryEntry, IndexDocument};

use crate::session::{now_millis, DacInner};
use crate::DacError;

/// Make `doc` the authoritative record of its kind.
///
/// Writes the writer-scoped copy first, so it stays independently readable
/// even when the index update below loses a race. The index step is a plain
/// read-modify-write: re-download, repoint, append the history entry, write
/// back. Two writers interleaving here can lose one pointer move or history
/// entry - last writer wins, by design.
pub(crate) async fn set_primary<S, T>(
    inner: &DacInner<S>,
    scoped: &StorePath,
    index_path: &StorePath,
    doc: &T,
) -> Result<(), DacError>
where
    S: DocumentStore,
    T: Serialize + DeserializeOwned + Default + Clone + Send + Sync,
{
    inner.set_doc_as(scoped, doc).await?;

    // An absent index is a fresh default, not a failure: the first write to
    // a domain creates it.
    let mut index: IndexDocument<T> = inner.get_doc_as(index_path).await?.unwrap_or_default();
    index.record_update(doc.clone(), &inner.config.writer, now_millis() as i64);
    inner.set_doc_as(index_path, &index).await?;

    Ok(())
}

/// Resolve the authoritative record of a kind.
///
/// With a writer named, reads that writer's scoped copy directly. Without
/// one, hops through the shared index: read `lastUpdatedBy`, then read that
/// writer's scoped copy. Another writer may move the pointer between the
/// two hops, so the result is a point-in-time snapshot, never linearizable.
///
/// Absent index, absent pointer, and absent document all resolve to the
/// default record: a domain with no writes yet is a normal state.
pub(crate) async fn resolve_primary<S, T>(
    inner: &DacInner<S>,
    index_path: &StorePath,
    doc_name: &str,
    requested: Option<&str>,
) -> Result<T, DacError>
where
    S: DocumentStore,
    T: DeserializeOwned + Default + Send,
{
    if let Some(writer) = requested {
        let path = inner.paths.scoped_doc(writer, doc_name)?;
        return Ok(inner.get_doc_as(&path).await?.unwrap_or_default());
    }

    let Some(index) = inner
        .get_doc_as::<IndexDocument<Value>>(index_path)
        .await?
    else {
        return Ok(T::default());
    };
    if !index.has_writer() {
        return Ok(T::default());
    }

    let path = inner.paths.scoped_doc(&index.last_updated_by, doc_name)?;
    Ok(inner.get_doc_as(&path).await?.unwrap_or_default())
}

/// The shared index's history log, oldest first, empty when the index does
/// not exist yet. Append-only and unpruned: length grows by one per
/// accepted write for the lifetime of the domain.
pub(crate) async fn history<S>(
    inner: &DacInner<S>,
    index_path: &StorePath,
) -> Result<Vec<HistoryEntry>, DacError>
where
    S: DocumentStore,
{
    let index: Option<IndexDocument<Value>> = inner.get_doc_as(index_path).await?;
    Ok(index.map(|i| i.history_log).unwrap_or_default())
}
