// Strong Types - newtypes for identifiers and timestamps shared by every entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Strongly-typed entity ID - prevents mixing ids with names or other text fields.
///
/// Ids arrive as opaque strings from the entity source ("1", "c-42", a UUID...)
/// and are only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank ids cannot be looked up or toggled
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed UTC timestamp used for `createdAt`, `joinedAt`, `postedAt`...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn value(self) -> DateTime<Utc> {
        self.0
    }

    pub fn date(self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_operations() {
        let id = EntityId::new("42");
        assert_eq!(id.as_str(), "42");
        assert!(id.is_valid());
        assert!(!EntityId::new("  ").is_valid());
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_entity_id_is_transparent_in_json() {
        let id: EntityId = serde_json::from_str("\"club-1\"").unwrap();
        assert_eq!(id, EntityId::from("club-1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"club-1\"");
    }

    #[test]
    fn test_timestamp_parses_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-25T00:00:00Z\"").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 1, 25).unwrap());
    }
}
