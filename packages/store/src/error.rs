//! Error type for the storage substrate.

use crate::path::PathError;

/// Errors surfaced by store backends.
///
/// A missing key is not an error: reads return `Ok(None)`. These variants
/// cover genuine failures - transport problems, malformed stored data, and
/// serialization of outgoing documents.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Path(#[from] PathError),

    #[error("failed to serialize a document: {message}")]
    Serialization { message: String },

    #[error("failed to deserialize a document: {message}")]
    Deserialization { message: String },

    #[error("backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Wrap a backend failure with its message.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_message() {
        let err = StoreError::Backend {
            message: "connection reset".to_string(),
        };
        assert!(err.to_string().contains("connection reset"));

        let err = StoreError::Deserialization {
            message: "unexpected token".to_string(),
        };
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn path_error_conversion() {
        let path_err = PathError::InvalidPath {
            message: "test".to_string(),
        };
        let err: StoreError = path_err.into();
        assert!(matches!(err, StoreError::Path(_)));
    }
}
