//! Entry point response shape.

use serde::{Deserialize, Serialize};

use crate::DacError;

/// Outcome of a mutating entry point.
///
/// Mutations never propagate errors to the caller: every failure is caught
/// and carried here as a message, so a transport layer can forward the
/// response verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DacResponse {
    pub submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DacResponse {
    /// The write was accepted.
    pub fn submitted() -> Self {
        Self {
            submitted: true,
            error: None,
        }
    }

    /// The write was rejected or failed.
    pub fn rejected(error: impl std::fmt::Display) -> Self {
        Self {
            submitted: false,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<(), DacError>> for DacResponse {
    fn from(result: Result<(), DacError>) -> Self {
        match result {
            Ok(()) => Self::submitted(),
            Err(e) => Self::rejected(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_has_no_error() {
        let response = DacResponse::submitted();
        assert!(response.submitted);
        assert!(response.error.is_none());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"submitted": true})
        );
    }

    #[test]
    fn rejection_carries_the_message() {
        let response = DacResponse::from(Err(DacError::NotReady));
        assert!(!response.submitted);
        assert!(response.error.unwrap().contains("not ready"));
    }
}
