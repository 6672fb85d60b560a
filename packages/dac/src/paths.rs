//! Per-domain key layout.

use profsync_store::{PathError, StorePath};

pub(crate) const PROFILE_DOC: &str = "userprofile.json";
pub(crate) const PREFERENCES_DOC: &str = "preferences.json";
const PROFILE_INDEX_DOC: &str = "profileIndex.json";
const PREFERENCES_INDEX_DOC: &str = "preferencesIndex.json";
pub(crate) const STATUS_ENTRY: &str = "userstatus";

/// The fixed key layout of one store domain, from one writer's point of
/// view. Static for the session; bootstrap pre-creates the shared keys so
/// interactive calls never pay the slow missing-key lookup.
///
/// ```text
/// <domain>/profileIndex.json          shared last-writer pointer, profile
/// <domain>/preferencesIndex.json      shared last-writer pointer, preferences
/// <domain>/<writer>/userprofile.json  this writer's profile copy
/// <domain>/<writer>/preferences.json  this writer's preferences copy
/// <domain>/userstatus                 global presence entry (raw)
/// <domain>/<writer>/userstatus        writer-scoped presence entry (raw)
/// ```
#[derive(Clone, Debug)]
pub struct FilePaths {
    pub profile_index: StorePath,
    pub preferences_index: StorePath,
    pub profile: StorePath,
    pub preferences: StorePath,
    pub status_global: StorePath,
    pub status: StorePath,
    domain: StorePath,
}

impl FilePaths {
    /// Build the layout for `domain` as seen by `writer`.
    pub fn new(domain: &str, writer: &str) -> Result<Self, PathError> {
        let domain = StorePath::parse(domain)?;
        let scoped = domain.child(writer)?;

        Ok(Self {
            profile_index: domain.child(PROFILE_INDEX_DOC)?,
            preferences_index: domain.child(PREFERENCES_INDEX_DOC)?,
            profile: scoped.child(PROFILE_DOC)?,
            preferences: scoped.child(PREFERENCES_DOC)?,
            status_global: domain.child(STATUS_ENTRY)?,
            status: scoped.child(STATUS_ENTRY)?,
            domain,
        })
    }

    /// Scoped document key of an arbitrary writer, e.g. its profile or
    /// preferences copy.
    pub fn scoped_doc(&self, writer: &str, doc: &str) -> Result<StorePath, PathError> {
        self.domain.child(writer)?.child(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_domain() {
        let paths = FilePaths::new("skyuser.hns", "skyapp.hns").unwrap();

        assert_eq!(paths.profile_index.to_string(), "skyuser.hns/profileIndex.json");
        assert_eq!(
            paths.preferences_index.to_string(),
            "skyuser.hns/preferencesIndex.json"
        );
        assert_eq!(
            paths.profile.to_string(),
            "skyuser.hns/skyapp.hns/userprofile.json"
        );
        assert_eq!(
            paths.preferences.to_string(),
            "skyuser.hns/skyapp.hns/preferences.json"
        );
        assert_eq!(paths.status_global.to_string(), "skyuser.hns/userstatus");
        assert_eq!(paths.status.to_string(), "skyuser.hns/skyapp.hns/userstatus");
    }

    #[test]
    fn scoped_doc_points_at_other_writers() {
        let paths = FilePaths::new("skyuser.hns", "skyapp.hns").unwrap();
        let other = paths.scoped_doc("otherapp.hns", PROFILE_DOC).unwrap();
        assert_eq!(other.to_string(), "skyuser.hns/otherapp.hns/userprofile.json");
    }

    #[test]
    fn rejects_invalid_writer_ids() {
        assert!(FilePaths::new("skyuser.hns", "bad/writer").is_err());
        assert!(FilePaths::new("", "skyapp.hns").is_ok()); // empty domain is the store root
    }
}
