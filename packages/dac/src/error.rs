//! Error taxonomy for the sync core.

use profsync_store::{PathError, StoreError};
use profsync_types::ValidationError;

/// Errors surfaced by the sync core.
///
/// Absent documents are deliberately not represented here: for reads, a
/// store domain with no writes yet is a normal state that resolves to
/// default documents, never to an error.
#[derive(thiserror::Error, Debug)]
pub enum DacError {
    /// The document was rejected before any write happened.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Bootstrap has not completed within the wait window.
    #[error("session is not ready")]
    NotReady,

    /// The storage substrate failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<PathError> for DacError {
    fn from(e: PathError) -> Self {
        DacError::Store(StoreError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts() {
        let err: DacError = ValidationError::EmptyUsername.into();
        assert!(matches!(err, DacError::Validation(_)));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn path_error_converts_through_store() {
        let err: DacError = PathError::InvalidPath {
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(err, DacError::Store(_)));
    }
}
