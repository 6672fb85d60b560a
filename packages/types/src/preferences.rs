//! The user preferences document.

use serde::{Deserialize, Serialize};

use crate::VERSION;

/// Visibility of a writer's published status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusPrivacy {
    /// Nothing is published; readers see the offline sentinel.
    #[default]
    Private,
    /// Presence is published.
    Public,
}

/// Visibility of the last-seen timestamp alongside a published status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum LastSeenPrivacy {
    /// The timestamp is withheld (published as `0`).
    #[default]
    Private,
    /// The timestamp is published with the status.
    PublicWithTimestamp,
}

/// Privacy settings and update cadence for status publishing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPreferences {
    pub status_privacy: StatusPrivacy,
    pub last_seen_privacy: LastSeenPrivacy,
    /// Suggested republish interval in minutes. A hint, not a contract.
    #[serde(default)]
    pub update_frequency: u32,
}

/// The preferences document shared across all writers of a store domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPreferences {
    pub version: u32,
    pub darkmode: bool,
    /// Preferred portal to resolve store links through.
    pub portal: String,
    #[serde(
        rename = "statusPreferences",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_preferences: Option<StatusPreferences>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            version: VERSION,
            darkmode: false,
            portal: "https://siasky.net".to_string(),
            status_preferences: None,
        }
    }
}

impl UserPreferences {
    /// Effective status privacy; `Private` when never configured.
    pub fn status_privacy(&self) -> StatusPrivacy {
        self.status_preferences
            .map(|p| p.status_privacy)
            .unwrap_or_default()
    }

    /// Effective last-seen privacy; `Private` when never configured.
    pub fn last_seen_privacy(&self) -> LastSeenPrivacy {
        self.status_preferences
            .map(|p| p.last_seen_privacy)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preferences() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.version, VERSION);
        assert!(!prefs.darkmode);
        assert_eq!(prefs.portal, "https://siasky.net");
        assert!(prefs.status_preferences.is_none());
    }

    #[test]
    fn privacy_defaults_to_private_when_unset() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.status_privacy(), StatusPrivacy::Private);
        assert_eq!(prefs.last_seen_privacy(), LastSeenPrivacy::Private);
    }

    #[test]
    fn privacy_enums_use_uppercase_wire_names() {
        let prefs = StatusPreferences {
            status_privacy: StatusPrivacy::Public,
            last_seen_privacy: LastSeenPrivacy::PublicWithTimestamp,
            update_frequency: 5,
        };
        let value = serde_json::to_value(prefs).unwrap();
        assert_eq!(value["statusPrivacy"], "PUBLIC");
        assert_eq!(value["lastSeenPrivacy"], "PUBLIC-WITH-TIMESTAMP");
        assert_eq!(value["updateFrequency"], 5);
    }

    #[test]
    fn preferences_roundtrip() {
        let prefs = UserPreferences {
            darkmode: true,
            status_preferences: Some(StatusPreferences {
                status_privacy: StatusPrivacy::Public,
                ..StatusPreferences::default()
            }),
            ..UserPreferences::default()
        };
        let value = serde_json::to_value(&prefs).unwrap();
        let back: UserPreferences = serde_json::from_value(value).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn unknown_preference_fields_are_rejected() {
        let result: Result<UserPreferences, _> = serde_json::from_value(serde_json::json!({
            "version": 1,
            "darkmode": false,
            "portal": "https://siasky.net",
            "theme": "solarized",
        }));
        assert!(result.is_err());
    }
}
