//! The session handle and its entry points.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use profsync_store::DocumentStore;
use profsync_types::{
    validate_preferences, validate_profile, HistoryEntry, ProfilePatch, StatusRecord,
    UserPreferences, UserProfile, UserStatus,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::paths::{PREFERENCES_DOC, PROFILE_DOC, STATUS_ENTRY};
use crate::session::DacInner;
use crate::{bootstrap, engine, refresh, status, DacConfig, DacError, DacResponse, FilePaths};

/// One writer's session against a shared store domain.
///
/// Construct it after the writer identity has been resolved, call
/// [`bootstrap`](Self::bootstrap) once, then use the entry points. Mutating
/// entry points wait on the readiness gate and report their outcome as a
/// [`DacResponse`]; read entry points bypass the gate and give best-effort,
/// point-in-time answers.
///
/// The handle owns the background refresh tasks; dropping it stops them.
pub struct ProfileDac<S> {
    inner: Arc<DacInner<S>>,
    tasks: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl<S: DocumentStore + 'static> ProfileDac<S> {
    /// Create a session owning its store.
    pub fn new(store: S, config: DacConfig) -> Result<Self, DacError> {
        Self::with_shared_store(Arc::new(Mutex::new(store)), config)
    }

    /// Create a session over a store shared with other sessions.
    ///
    /// Two sessions with different writer identifiers over one backend is
    /// the multi-writer setup; nothing coordinates their index updates.
    pub fn with_shared_store(store: Arc<Mutex<S>>, config: DacConfig) -> Result<Self, DacError> {
        let paths = FilePaths::new(&config.data_domain, &config.writer)?;
        Ok(Self {
            inner: Arc::new(DacInner::new(store, config, paths)),
            tasks: std::sync::Mutex::new(Vec::new()),
        })
    }

    /// This session's writer identifier.
    pub fn writer(&self) -> &str {
        &self.inner.config.writer
    }

    /// Whether bootstrap has completed.
    pub fn is_ready(&self) -> bool {
        self.inner.gate.is_ready()
    }

    /// Wait until bootstrap completes, failing with [`DacError::NotReady`]
    /// after `timeout`.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<(), DacError> {
        self.inner.gate.wait(timeout).await
    }

    /// Pre-create the expected store keys and start the refresh schedule.
    ///
    /// Idempotent. On completion the readiness gate flips and mutating
    /// entry points proceed. If every ensure-task failed the gate stays
    /// unset and a later call retries.
    pub async fn bootstrap(&self) {
        if self.inner.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }

        // The refresh schedule starts when bootstrap begins and runs for
        // the life of the session.
        {
            let mut tasks = self.tasks.lock().unwrap();
            if tasks.is_empty() {
                tasks.extend(refresh::spawn(self.inner.clone()));
            }
        }

        if bootstrap::ensure_present(&self.inner).await {
            self.inner.gate.mark_ready();
        } else {
            self.inner.bootstrapped.store(false, Ordering::SeqCst);
        }
    }

    /// Replace this writer's profile and make it the authoritative copy.
    pub async fn set_profile(&self, profile: UserProfile) -> DacResponse {
        self.try_set_profile(profile).await.into()
    }

    async fn try_set_profile(&self, profile: UserProfile) -> Result<(), DacError> {
        self.inner.gate.wait(self.inner.config.ready_timeout).await?;
        validate_profile(&profile)?;
        engine::set_primary(
            &self.inner,
            &self.inner.paths.profile,
            &self.inner.paths.profile_index,
            &profile,
        )
        .await
    }

    /// Merge a partial update over this writer's current profile.
    ///
    /// Fields absent from the patch keep their value; `avatar` entries are
    /// appended to the existing gallery rather than replacing it.
    pub async fn update_profile(&self, patch: ProfilePatch) -> DacResponse {
        self.try_update_profile(patch).await.into()
    }

    async fn try_update_profile(&self, patch: ProfilePatch) -> Result<(), DacError> {
        self.inner.gate.wait(self.inner.config.ready_timeout).await?;

        let current: UserProfile = self
            .inner
            .get_doc_as(&self.inner.paths.profile)
            .await?
            .unwrap_or_default();
        let merged = patch.apply(current);

        validate_profile(&merged)?;
        engine::set_primary(
            &self.inner,
            &self.inner.paths.profile,
            &self.inner.paths.profile_index,
            &merged,
        )
        .await
    }

    /// Replace this writer's preferences and make them the authoritative
    /// copy.
    pub async fn set_preferences(&self, prefs: UserPreferences) -> DacResponse {
        self.try_set_preferences(prefs).await.into()
    }

    async fn try_set_preferences(&self, prefs: UserPreferences) -> Result<(), DacError> {
        self.inner.gate.wait(self.inner.config.ready_timeout).await?;
        validate_preferences(&prefs)?;
        engine::set_primary(
            &self.inner,
            &self.inner.paths.preferences,
            &self.inner.paths.preferences_index,
            &prefs,
        )
        .await?;

        // Our write is now the indexed copy; keep both caches in step so
        // status publishing sees it without waiting for the next refresh.
        *self.inner.scoped_prefs.lock().await = Some(prefs.clone());
        *self.inner.shared_prefs.lock().await = Some(prefs);
        Ok(())
    }

    /// Publish a presence status through the privacy gates.
    pub async fn set_status(&self, requested: UserStatus) -> DacResponse {
        self.try_set_status(requested).await.into()
    }

    async fn try_set_status(&self, requested: UserStatus) -> Result<(), DacError> {
        self.inner.gate.wait(self.inner.config.ready_timeout).await?;
        status::publish_status(&self.inner, requested).await
    }

    /// The authoritative profile: a named writer's copy, or the one the
    /// shared index currently points at. A domain with no writes resolves
    /// to the default profile.
    pub async fn get_profile(&self, writer: Option<&str>) -> Result<UserProfile, DacError> {
        engine::resolve_primary(
            &self.inner,
            &self.inner.paths.profile_index,
            PROFILE_DOC,
            writer,
        )
        .await
    }

    /// The authoritative preferences, resolved like
    /// [`get_profile`](Self::get_profile).
    pub async fn get_preferences(&self, writer: Option<&str>) -> Result<UserPreferences, DacError> {
        engine::resolve_primary(
            &self.inner,
            &self.inner.paths.preferences_index,
            PREFERENCES_DOC,
            writer,
        )
        .await
    }

    /// Profile update history, oldest first.
    pub async fn get_profile_history(&self) -> Result<Vec<HistoryEntry>, DacError> {
        engine::history(&self.inner, &self.inner.paths.profile_index).await
    }

    /// Preferences update history, oldest first.
    pub async fn get_preferences_history(&self) -> Result<Vec<HistoryEntry>, DacError> {
        engine::history(&self.inner, &self.inner.paths.preferences_index).await
    }

    /// Decode a published presence entry: a named writer's, or the global
    /// one. Absent entries read as the offline sentinel.
    pub async fn get_status(&self, writer: Option<&str>) -> Result<StatusRecord, DacError> {
        let path = match writer {
            Some(writer) => self.inner.paths.scoped_doc(writer, STATUS_ENTRY)?,
            None => self.inner.paths.status_global.clone(),
        };
        let record = self
            .inner
            .get_raw(&path)
            .await?
            .map(|raw| StatusRecord::decode(&raw))
            .unwrap_or_default();
        Ok(record)
    }
}

impl<S> Drop for ProfileDac<S> {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}
