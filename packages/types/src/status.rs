//! The compact status/presence record and its delimited-string codec.
//!
//! Status changes often and is read by every peer, so it is stored as a
//! short `status|lastSeenMillis` byte string through the raw entry
//! primitive instead of a structured document.

use std::fmt;

use bytes::Bytes;

/// A writer's presence state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserStatus {
    Online,
    Idle,
    DoNotDisturb,
    Invisible,
    /// No presence signal. Doubles as the privacy sentinel.
    #[default]
    None,
}

impl UserStatus {
    /// Wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Idle => "Idle",
            Self::DoNotDisturb => "DoNotDisturb",
            Self::Invisible => "Invisible",
            Self::None => "None",
        }
    }

    /// Parse a wire token; unknown tokens are `None`.
    pub fn parse(token: &str) -> Self {
        match token {
            "Online" => Self::Online,
            "Idle" => Self::Idle,
            "DoNotDisturb" => Self::DoNotDisturb,
            "Invisible" => Self::Invisible,
            _ => Self::None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status value with the moment it was last refreshed.
///
/// `last_seen` is unix milliseconds, `0` meaning withheld or never seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusRecord {
    pub status: UserStatus,
    pub last_seen: u64,
}

impl StatusRecord {
    /// The `None|0` sentinel published when privacy withholds presence.
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Encode as the `status|lastSeen` wire string.
    pub fn encode(&self) -> Bytes {
        Bytes::from(format!("{}|{}", self.status, self.last_seen))
    }

    /// Decode a wire string, splitting on the first delimiter.
    ///
    /// Empty input, input without a delimiter, and unknown tokens all decode
    /// to the sentinel rather than failing: a malformed entry reads as "no
    /// presence", never as an error.
    pub fn decode(raw: &[u8]) -> Self {
        let Ok(text) = std::str::from_utf8(raw) else {
            return Self::sentinel();
        };
        let Some((status, last_seen)) = text.split_once('|') else {
            return Self::sentinel();
        };

        Self {
            status: UserStatus::parse(status),
            last_seen: last_seen.parse().unwrap_or(0),
        }
    }
}
