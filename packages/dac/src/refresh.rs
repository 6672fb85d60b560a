//! Scheduled background refresh.
//!
//! Three independent periodic tasks run for the life of the session: two
//! re-pull the preference caches, one republishes presence so last-seen
//! stays fresh. A failed tick is logged and the schedule continues.

use std::sync::Arc;
use std::time::Duration;

use profsync_store::DocumentStore;
use profsync_types::{StatusRecord, UserPreferences};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::engine;
use crate::paths::PREFERENCES_DOC;
use crate::session::DacInner;
use crate::{status, DacError};

/// Spawn the three refresh tasks. The returned handles are aborted when the
/// session handle drops.
pub(crate) fn spawn<S>(inner: Arc<DacInner<S>>) -> Vec<JoinHandle<()>>
where
    S: DocumentStore + 'static,
{
    vec![
        tokio::spawn(run_shared_preferences(inner.clone())),
        tokio::spawn(run_scoped_preferences(inner.clone())),
        tokio::spawn(run_status_republish(inner)),
    ]
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn run_shared_preferences<S: DocumentStore>(inner: Arc<DacInner<S>>) {
    let mut ticker = ticker(inner.config.preferences_refresh);
    loop {
        ticker.tick().await;
        if let Err(e) = refresh_shared(&inner).await {
            log::warn!("shared preferences refresh failed: {}", e);
        }
    }
}

async fn run_scoped_preferences<S: DocumentStore>(inner: Arc<DacInner<S>>) {
    let mut ticker = ticker(inner.config.preferences_refresh);
    loop {
        ticker.tick().await;
        if let Err(e) = refresh_scoped(&inner).await {
            log::warn!("scoped preferences refresh failed: {}", e);
        }
    }
}

async fn run_status_republish<S: DocumentStore>(inner: Arc<DacInner<S>>) {
    let mut ticker = ticker(inner.config.status_refresh);
    loop {
        ticker.tick().await;
        if let Err(e) = republish_status(&inner).await {
            log::warn!("status republish failed: {}", e);
        }
    }
}

/// Re-pull the shared preferences through the index into the cache.
async fn refresh_shared<S: DocumentStore>(inner: &DacInner<S>) -> Result<(), DacError> {
    let prefs: UserPreferences =
        engine::resolve_primary(inner, &inner.paths.preferences_index, PREFERENCES_DOC, None)
            .await?;
    *inner.shared_prefs.lock().await = Some(prefs);
    Ok(())
}

/// Re-pull this writer's own preferences into the cache.
async fn refresh_scoped<S: DocumentStore>(inner: &DacInner<S>) -> Result<(), DacError> {
    let prefs: UserPreferences = inner
        .get_doc_as(&inner.paths.preferences)
        .await?
        .unwrap_or_default();
    *inner.scoped_prefs.lock().await = Some(prefs);
    Ok(())
}

/// Re-publish the current status so readers see a fresh last-seen.
async fn republish_status<S: DocumentStore>(inner: &DacInner<S>) -> Result<(), DacError> {
    let current = inner
        .get_raw(&inner.paths.status)
        .await?
        .map(|raw| StatusRecord::decode(&raw))
        .unwrap_or_default();
    status::publish_status(inner, current.status).await
}
