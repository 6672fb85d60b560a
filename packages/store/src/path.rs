//! Store key type with validated file-like components.

use std::fmt;

/// Errors related to store key parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A key component contains characters outside the allowed set.
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
    /// The key string as a whole is invalid.
    InvalidPath { message: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidComponent {
                component,
                position,
                message,
            } => {
                write!(
                    f,
                    "invalid key component '{}' at position {}: {}",
                    component, position, message
                )
            }
            PathError::InvalidPath { message } => {
                write!(f, "invalid key: {}", message)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A validated store key.
///
/// Keys are slash-separated sequences of file-like components: store domains
/// (`skyuser.hns`), writer identifiers (`skyapp.hns`) and document names
/// (`userprofile.json`). Components may contain ASCII letters, digits, `.`,
/// `_` and `-`, and must not be the relative markers `.` or `..`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StorePath {
    pub components: Vec<String>,
}

impl StorePath {
    /// Parse a key string, validating components.
    ///
    /// Components are separated by `/`; empty components are ignored, which
    /// normalizes `//` and trailing slashes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use profsync_store::StorePath;
    ///
    /// let key = StorePath::parse("skyuser.hns/skyapp.hns/userprofile.json").unwrap();
    /// assert_eq!(key.len(), 3);
    ///
    /// assert_eq!(
    ///     StorePath::parse("foo/bar/").unwrap(),
    ///     StorePath::parse("foo/bar").unwrap(),
    /// );
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let components: Vec<String> = s
            .split('/')
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .collect();

        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }

        Ok(StorePath { components })
    }

    /// Try to create a key from components, validating each.
    pub fn try_from_components(components: Vec<String>) -> Result<Self, PathError> {
        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }
        Ok(StorePath { components })
    }

    fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
        if component.is_empty() {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "empty component".to_string(),
            });
        }

        if component == "." || component == ".." {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "relative path markers are not allowed".to_string(),
            });
        }

        for c in component.chars() {
            if !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-') {
                return Err(PathError::InvalidComponent {
                    component: component.to_string(),
                    position,
                    message: format!("invalid character '{}'", c),
                });
            }
        }

        Ok(())
    }

    /// Check if this key is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Join this key with another.
    #[must_use]
    pub fn join(&self, other: &StorePath) -> StorePath {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        StorePath { components }
    }

    /// Append a single validated component.
    pub fn child(&self, component: &str) -> Result<StorePath, PathError> {
        StorePath::validate_component(component, self.components.len())?;
        let mut components = self.components.clone();
        components.push(component.to_string());
        Ok(StorePath { components })
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

impl std::ops::Index<usize> for StorePath {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

/// Macro for creating store keys from literals.
///
/// # Example
///
/// ```rust
/// use profsync_store::store_path;
///
/// let key = store_path!("skyuser.hns/userstatus");
/// assert_eq!(key.len(), 2);
/// ```
#[macro_export]
macro_rules! store_path {
    ($s:expr) => {
        $crate::StorePath::parse($s).expect("invalid key literal")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_keys() {
        assert_eq!(StorePath::parse("").unwrap().len(), 0);
        assert_eq!(StorePath::parse("foo").unwrap().len(), 1);
        assert_eq!(StorePath::parse("foo/bar").unwrap().len(), 2);
        assert_eq!(
            StorePath::parse("skyuser.hns/skyapp.hns/userprofile.json")
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn normalize_slashes() {
        assert_eq!(
            StorePath::parse("foo/bar/").unwrap(),
            StorePath::parse("foo/bar").unwrap()
        );
        assert_eq!(
            StorePath::parse("foo//bar").unwrap(),
            StorePath::parse("/foo/bar").unwrap()
        );
    }

    #[test]
    fn file_like_components_allowed() {
        let key = store_path!("sky-user.hns/_staging/user_profile-v2.json");
        assert_eq!(key.len(), 3);
    }

    #[test]
    fn invalid_components_rejected() {
        assert!(StorePath::parse("foo/bar baz").is_err()); // space
        assert!(StorePath::parse("foo/./bar").is_err()); // relative marker
        assert!(StorePath::parse("foo/../bar").is_err()); // traversal
        assert!(StorePath::parse("foo/bär").is_err()); // non-ascii
    }

    #[test]
    fn child_appends_component() {
        let base = store_path!("skyuser.hns");
        let scoped = base.child("skyapp.hns").unwrap();
        assert_eq!(scoped.to_string(), "skyuser.hns/skyapp.hns");
        assert!(base.child("no/slashes").is_err());
    }

    #[test]
    fn join_keys() {
        let a = store_path!("foo/bar");
        let b = store_path!("baz");
        assert_eq!(a.join(&b).to_string(), "foo/bar/baz");
        assert_eq!(a.join(&store_path!("")), a);
    }

    #[test]
    fn display_impl() {
        let key = store_path!("foo/bar/baz.json");
        assert_eq!(format!("{}", key), "foo/bar/baz.json");
        assert_eq!(format!("{}", store_path!("")), "");
    }

    #[test]
    fn index_trait() {
        let key = store_path!("a/b/c");
        assert_eq!(&key[0], "a");
        assert_eq!(&key[2], "c");
    }

    #[test]
    fn path_hash_and_ord() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(store_path!("foo"));
        set.insert(store_path!("bar"));
        set.insert(store_path!("foo"));
        assert_eq!(set.len(), 2);

        assert!(store_path!("a/b") < store_path!("a/c"));
    }

    #[test]
    fn path_error_display() {
        let err = PathError::InvalidComponent {
            component: "bad component".to_string(),
            position: 2,
            message: "invalid character ' '".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("bad component"));
        assert!(display.contains("position 2"));
    }
}
