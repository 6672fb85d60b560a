//! Validation of incoming documents before any write is accepted.
//!
//! Schema conformance (field names and types) is enforced by serde at
//! deserialization; the checks here cover what types alone cannot express.

use url::Url;

use crate::{Avatar, UserPreferences, UserProfile, VERSION};

/// A document failed validation. Nothing was written.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("document version {found} is invalid, only version {VERSION} is supported")]
    InvalidVersion { found: u32 },

    #[error("'username' can not be an empty string")]
    EmptyUsername,

    #[error("avatar field '{field}' can not be empty")]
    EmptyAvatarField { field: &'static str },

    #[error("'portal' is not a valid url: {0}")]
    InvalidPortal(#[from] url::ParseError),
}

/// Validate a profile document.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    if profile.version != VERSION {
        return Err(ValidationError::InvalidVersion {
            found: profile.version,
        });
    }
    if profile.username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    for avatar in &profile.avatar {
        validate_avatar(avatar)?;
    }
    Ok(())
}

/// Validate a single avatar entry.
pub fn validate_avatar(avatar: &Avatar) -> Result<(), ValidationError> {
    if avatar.ext.is_empty() {
        return Err(ValidationError::EmptyAvatarField { field: "ext" });
    }
    if avatar.url.is_empty() {
        return Err(ValidationError::EmptyAvatarField { field: "url" });
    }
    Ok(())
}

/// Validate a preferences document.
pub fn validate_preferences(prefs: &UserPreferences) -> Result<(), ValidationError> {
    if prefs.version != VERSION {
        return Err(ValidationError::InvalidVersion {
            found: prefs.version,
        });
    }
    Url::parse(&prefs.portal)?;
    Ok(())
}
