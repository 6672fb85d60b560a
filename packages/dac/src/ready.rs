//! The one-shot readiness gate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

use crate::DacError;

/// Process-wide readiness flag, created unset and flipped exactly once when
/// bootstrap completes.
///
/// Mutating entry points wait on the gate so they never run before the
/// expected store keys have been pre-created. Waiters block on a
/// notification rather than polling; the timeout-and-fail contract is
/// unchanged: a wait that outlives its window fails with
/// [`DacError::NotReady`].
#[derive(Debug, Default)]
pub struct ReadinessGate {
    ready: AtomicBool,
    notify: Notify,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether bootstrap has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Flip the gate and wake every waiter. Idempotent.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Wait until the gate flips, failing after `timeout`.
    ///
    /// Returns immediately when the gate is already set.
    pub async fn wait(&self, timeout: Duration) -> Result<(), DacError> {
        if self.is_ready() {
            return Ok(());
        }

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            // Register interest before the re-check so a mark_ready between
            // the two cannot be missed.
            let notified = self.notify.notified();
            if self.is_ready() {
                return Ok(());
            }
            match tokio::time::timeout_at(deadline, notified).await {
                Ok(()) if self.is_ready() => return Ok(()),
                Ok(()) => continue,
                Err(_) => return Err(DacError::NotReady),
            }
        }
    }
}
