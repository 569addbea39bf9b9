//! Type-safe session token wrapper around [`Uuid`].
//!
//! Session tokens travel over the wire as opaque strings of the form
//! `sim-<uuid>`. Parsing the string form back into a [`SessionId`] is the
//! first gate a client token passes through: anything that does not carry
//! the prefix and a well-formed UUID can never name a live session.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;
use uuid::Uuid;

/// Prefix carried by every session token.
pub const SESSION_PREFIX: &str = "sim-";

/// Errors produced when parsing a session token string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    /// The token does not start with [`SESSION_PREFIX`].
    #[error("session token is missing the `sim-` prefix")]
    MissingPrefix,

    /// The part after the prefix is not a valid UUID.
    #[error("session token does not contain a valid UUID: {0}")]
    InvalidUuid(String),
}

/// Opaque identifier for a client session, backed by a random UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SESSION_PREFIX}{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = SessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix(SESSION_PREFIX)
            .ok_or(SessionIdError::MissingPrefix)?;
        raw.parse::<Uuid>()
            .map(Self)
            .map_err(|e| SessionIdError::InvalidUuid(e.to_string()))
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
