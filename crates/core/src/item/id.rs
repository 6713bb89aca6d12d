use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Prefix used when rendering provisional ids as strings.
const PROVISIONAL_PREFIX: &str = "provisional:";

/// Identifier for an entry or task.
///
/// Items created optimistically carry a [`ItemId::Provisional`] id until the
/// server assigns a real one. Keeping the distinction in the type system means
/// no code path can mistake a provisional id for a server-issued one, and a
/// cache scan can assert that settled views never retain provisional ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    /// Server-issued identifier.
    Assigned(Uuid),
    /// Locally synthesized identifier standing in for a not-yet-assigned one.
    Provisional(Uuid),
}

impl ItemId {
    /// Wraps a server-issued identifier.
    pub fn assigned(id: Uuid) -> Self {
        Self::Assigned(id)
    }

    /// Generates a fresh provisional identifier.
    pub fn provisional() -> Self {
        Self::Provisional(Uuid::new_v4())
    }

    /// Returns true if this id was synthesized locally.
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }

    /// Returns the underlying UUID regardless of provenance.
    pub fn as_uuid(&self) -> Uuid {
        match self {
            Self::Assigned(id) | Self::Provisional(id) => *id,
        }
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self::Assigned(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assigned(id) => write!(f, "{}", id),
            Self::Provisional(id) => write!(f, "{}{}", PROVISIONAL_PREFIX, id),
        }
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(PROVISIONAL_PREFIX) {
            Some(rest) => Uuid::parse_str(rest).map(Self::Provisional),
            None => Uuid::parse_str(s).map(Self::Assigned),
        }
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
