//! The user profile document and partial updates to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::VERSION;

/// One entry in a profile's avatar gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Avatar {
    /// Image format extension, e.g. `"png"`.
    pub ext: String,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
    /// Location of the image data.
    pub url: String,
}

/// The profile document shared across all writers of a store domain.
///
/// `username` is required and must be non-empty; everything else is
/// optional. Unknown fields are rejected at deserialization, which is how
/// schema conformance is enforced before a write is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    pub version: u32,
    pub username: String,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "emailID", default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "aboutMe", default, skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Ordered avatar gallery. Partial updates append to this sequence
    /// instead of replacing it.
    #[serde(default)]
    pub avatar: Vec<Avatar>,
    /// Opaque connection records owned by other systems.
    #[serde(default)]
    pub connections: Vec<Value>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            version: VERSION,
            username: "anonymous".to_string(),
            first_name: None,
            last_name: None,
            email_id: None,
            contact: None,
            about_me: None,
            location: None,
            topics: Vec::new(),
            avatar: Vec::new(),
            connections: Vec::new(),
        }
    }
}

/// A partial profile update.
///
/// Every field is optional; absent fields keep their current value. The one
/// field with additive semantics is `avatar`: when both the current profile
/// and the patch define it, the result is current followed by incoming,
/// modelling "add an avatar" rather than "replace the gallery". `topics` and
/// `connections` overwrite wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "emailID", default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "aboutMe", default, skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Vec<Avatar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<Value>>,
}

impl ProfilePatch {
    /// Shallow-merge this patch over `current`, field by field.
    pub fn apply(self, mut current: UserProfile) -> UserProfile {
        if let Some(version) = self.version {
            current.version = version;
        }
        if let Some(username) = self.username {
            current.username = username;
        }
        if let Some(first_name) = self.first_name {
            current.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            current.last_name = Some(last_name);
        }
        if let Some(email_id) = self.email_id {
            current.email_id = Some(email_id);
        }
        if let Some(contact) = self.contact {
            current.contact = Some(contact);
        }
        if let Some(about_me) = self.about_me {
            current.about_me = Some(about_me);
        }
        if let Some(location) = self.location {
            current.location = Some(location);
        }
        if let Some(topics) = self.topics {
            current.topics = topics;
        }
        if let Some(incoming) = self.avatar {
            // Additive: keep the existing gallery, append the new entries.
            current.avatar.extend(incoming);
        }
        if let Some(connections) = self.connections {
            current.connections = connections;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar(ext: &str) -> Avatar {
        Avatar {
            ext: ext.to_string(),
            width: 64,
            height: 64,
            url: format!("sia://avatar.{ext}"),
        }
    }

    #[test]
    fn default_profile_is_anonymous() {
        let profile = UserProfile::default();
        assert_eq!(profile.version, VERSION);
        assert_eq!(profile.username, "anonymous");
        assert!(profile.avatar.is_empty());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let profile = UserProfile {
            first_name: Some("Ada".to_string()),
            email_id: Some("ada@example.com".to_string()),
            about_me: Some("hi".to_string()),
            ..UserProfile::default()
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("firstName").is_some());
        assert!(value.get("emailID").is_some());
        assert!(value.get("aboutMe").is_some());
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn avatar_wire_uses_short_dimension_names() {
        let value = serde_json::to_value(avatar("png")).unwrap();
        assert_eq!(value.get("w"), Some(&serde_json::json!(64)));
        assert_eq!(value.get("h"), Some(&serde_json::json!(64)));
    }

    #[test]
    fn unknown_profile_fields_are_rejected() {
        let result: Result<UserProfile, _> = serde_json::from_value(serde_json::json!({
            "version": 1,
            "username": "ada",
            "nickname": "countess",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_avatar_field_is_rejected() {
        let result: Result<Avatar, _> = serde_json::from_value(serde_json::json!({
            "w": 1, "h": 1, "url": "url",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_merges_scalar_fields() {
        let current = UserProfile {
            username: "ada".to_string(),
            location: Some("London".to_string()),
            ..UserProfile::default()
        };
        let patch = ProfilePatch {
            location: Some("Paris".to_string()),
            ..ProfilePatch::default()
        };

        let merged = patch.apply(current);
        assert_eq!(merged.username, "ada");
        assert_eq!(merged.location.as_deref(), Some("Paris"));
    }

    #[test]
    fn patch_appends_avatars() {
        let current = UserProfile {
            avatar: vec![avatar("png")],
            ..UserProfile::default()
        };
        let patch = ProfilePatch {
            avatar: Some(vec![avatar("webp")]),
            ..ProfilePatch::default()
        };

        let merged = patch.apply(current);
        assert_eq!(merged.avatar.len(), 2);
        assert_eq!(merged.avatar[0].ext, "png");
        assert_eq!(merged.avatar[1].ext, "webp");
    }

    #[test]
    fn patch_overwrites_topics_wholesale() {
        // Only avatar is additive. Topics replace, matching the source
        // behavior's asymmetry.
        let current = UserProfile {
            topics: vec!["rust".to_string(), "storage".to_string()],
            ..UserProfile::default()
        };
        let patch = ProfilePatch {
            topics: Some(vec!["sync".to_string()]),
            ..ProfilePatch::default()
        };

        let merged = patch.apply(current);
        assert_eq!(merged.topics, vec!["sync".to_string()]);
    }

    #[test]
    fn empty_patch_is_identity() {
        let current = UserProfile {
            username: "ada".to_string(),
            avatar: vec![avatar("png")],
            ..UserProfile::default()
        };
        let merged = ProfilePatch::default().apply(current.clone());
        assert_eq!(merged, current);
    }
}
