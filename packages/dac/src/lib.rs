//! Index-and-merge synchronization core for profsync.
//!
//! Many independent client applications ("writers") share one logical user
//! profile and one logical preferences record in a key-addressed document
//! store with no multi-document transactions. This crate coordinates them:
//!
//! - a **readiness gate** holds mutating calls until bootstrap has
//!   pre-created the expected keys, hiding the store's slow missing-key
//!   lookups from interactive calls
//! - a shared **index document** per record kind names the writer whose
//!   scoped document is currently authoritative, and carries an append-only
//!   **history log** of accepted writes
//! - **partial updates** merge over the writer's current document instead of
//!   clobbering it, with an additive rule for the avatar gallery
//! - **status/presence** is published as a compact delimited entry, gated by
//!   per-scope privacy settings
//! - **scheduled refresh** tasks re-pull preference caches and republish
//!   presence for the life of the session
//!
//! The index update is a plain read-modify-write: the substrate offers no
//! compare-and-swap, so concurrent writers race last-writer-wins. That is an
//! accepted property of the design, not something this crate masks.
//!
//! # Example
//!
//! ```rust,ignore
//! use profsync_dac::{DacConfig, ProfileDac};
//! use profsync_store::InMemoryStore;
//! use profsync_types::UserProfile;
//!
//! let dac = ProfileDac::new(
//!     InMemoryStore::new(),
//!     DacConfig::new("skyuser.hns", "skyapp.hns"),
//! )?;
//! dac.bootstrap().await;
//!
//! let response = dac.set_profile(UserProfile::default()).await;
//! assert!(response.submitted);
//! ```

mod bootstrap;
mod config;
mod dac;
mod engine;
mod error;
mod paths;
mod ready;
mod refresh;
mod response;
mod session;
mod status;

pub use config::DacConfig;
pub use dac::ProfileDac;
pub use error::DacError;
pub use paths::FilePaths;
pub use ready::ReadinessGate;
pub use response::DacResponse;

// Re-export the document model for convenience.
pub use profsync_types::{
    Avatar, HistoryEntry, IndexDocument, LastSeenPrivacy, ProfilePatch, StatusPreferences,
    StatusPrivacy, StatusRecord, UserPreferences, UserProfile, UserStatus, VERSION,
};
