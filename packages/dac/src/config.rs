//! Session configuration.

use std::time::Duration;

/// Static configuration of one writer session.
///
/// The writer identifier is resolved once, before the session is
/// constructed, and stays immutable for the session's lifetime: it is the
/// key under which the writer's private documents live and the value
/// recorded in the shared index's `lastUpdatedBy`.
#[derive(Clone, Debug)]
pub struct DacConfig {
    /// Store domain all shared documents live under, e.g. `skyuser.hns`.
    pub data_domain: String,
    /// Identifier of this writer, e.g. `skyapp.hns`.
    pub writer: String,
    /// How long mutating entry points wait for bootstrap before failing
    /// with `NotReady`.
    pub ready_timeout: Duration,
    /// Cadence of the shared and writer-scoped preferences cache refresh.
    pub preferences_refresh: Duration,
    /// Cadence of the presence republish that bumps last-seen.
    pub status_refresh: Duration,
}

impl DacConfig {
    /// Configuration with the standard timings: 60 s readiness wait, 5 min
    /// preferences refresh, 2 min status republish.
    pub fn new(data_domain: impl Into<String>, writer: impl Into<String>) -> Self {
        Self {
            data_domain: data_domain.into(),
            writer: writer.into(),
            ready_timeout: Duration::from_secs(60),
            preferences_refresh: Duration::from_secs(5 * 60),
            status_refresh: Duration::from_secs(2 * 60),
        }
    }
}
