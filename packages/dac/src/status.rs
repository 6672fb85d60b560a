//! Privacy-gated presence publishing.

use profsync_store::DocumentStore;
use profsync_types::{LastSeenPrivacy, StatusPrivacy, StatusRecord, UserPreferences, UserStatus};

use crate::engine;
use crate::paths::PREFERENCES_DOC;
use crate::session::{now_millis, DacInner};
use crate::DacError;

/// Publish `requested` through both presence entries, applying the privacy
/// gates.
///
/// The global entry never carries a concrete status - it only signals
/// presence or absence to readers that do not know which writer to ask. The
/// writer-scoped entry carries the requested status, but only when both the
/// shared and the writer-scoped privacy settings allow it. Timestamps are
/// gated separately per scope by the last-seen privacy.
pub(crate) async fn publish_status<S: DocumentStore>(
    inner: &DacInner<S>,
    requested: UserStatus,
) -> Result<(), DacError> {
    let shared = shared_preferences(inner).await?;

    if shared.status_privacy() != StatusPrivacy::Public {
        // Shared privacy wins: withhold presence entirely. The scoped entry
        // is not published either, it is only meaningful alongside a public
        // global signal.
        inner
            .set_raw(&inner.paths.status_global, StatusRecord::sentinel().encode())
            .await?;
        return Ok(());
    }

    let now = now_millis();
    let global = StatusRecord {
        status: UserStatus::None,
        last_seen: gated_timestamp(shared.last_seen_privacy(), now),
    };
    inner
        .set_raw(&inner.paths.status_global, global.encode())
        .await?;

    let scoped_prefs = scoped_preferences(inner).await?;
    let scoped = if scoped_prefs.status_privacy() == StatusPrivacy::Public {
        StatusRecord {
            status: requested,
            last_seen: gated_timestamp(scoped_prefs.last_seen_privacy(), now),
        }
    } else {
        StatusRecord::sentinel()
    };
    inner.set_raw(&inner.paths.status, scoped.encode()).await?;

    Ok(())
}

fn gated_timestamp(privacy: LastSeenPrivacy, now: u64) -> u64 {
    match privacy {
        LastSeenPrivacy::PublicWithTimestamp => now,
        LastSeenPrivacy::Private => 0,
    }
}

/// Shared (cross-writer) preferences, from the cache when warm, resolved
/// through the preferences index otherwise.
pub(crate) async fn shared_preferences<S: DocumentStore>(
    inner: &DacInner<S>,
) -> Result<UserPreferences, DacError> {
    {
        let cache = inner.shared_prefs.lock().await;
        if let Some(prefs) = cache.as_ref() {
            return Ok(prefs.clone());
        }
    }

    let prefs: UserPreferences =
        engine::resolve_primary(inner, &inner.paths.preferences_index, PREFERENCES_DOC, None)
            .await?;
    *inner.shared_prefs.lock().await = Some(prefs.clone());
    Ok(prefs)
}

/// This writer's own preferences, from the cache when warm.
pub(crate) async fn scoped_preferences<S: DocumentStore>(
    inner: &DacInner<S>,
) -> Result<UserPreferences, DacError> {
    {
        let cache = inner.scoped_prefs.lock().await;
        if let Some(prefs) = cache.as_ref() {
            return Ok(prefs.clone());
        }
    }

    let prefs: UserPreferences = inner
        .get_doc_as(&inner.paths.preferences)
        .await?
        .unwrap_or_default();
    *inner.scoped_prefs.lock().await = Some(prefs.clone());
    Ok(prefs)
}
