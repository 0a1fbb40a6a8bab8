// Data Seeder - loads a fixture bundle (the entity source) from JSON

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::core::EntityId;
use crate::error::{AppError, AppResult};
use crate::models::{Club, Connection, Event, JobOpportunity, Message, RsvpStatus, StudyGroup, User};

/// Everything the service needs to start: entity collections plus the
/// signed-in user's existing relationships. Missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub study_groups: Vec<StudyGroup>,
    pub clubs: Vec<Club>,
    pub events: Vec<Event>,
    pub jobs: Vec<JobOpportunity>,
    pub connections: Vec<Connection>,
    pub pending_requests: Vec<Connection>,
    pub messages: Vec<Message>,
    /// Unread messages per conversation participant
    pub unread_counts: HashMap<EntityId, u32>,
    pub joined_clubs: Vec<EntityId>,
    pub rsvps: HashMap<EntityId, RsvpStatus>,
    pub saved_jobs: Vec<EntityId>,
}

impl Fixtures {
    pub fn from_json(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::Storage(format!("reading {}: {}", path.display(), e)))?;
        let fixtures = Self::from_json(&raw)?;
        info!(
            "Read fixtures from {}: {} users, {} groups, {} clubs, {} events, {} jobs",
            path.display(),
            fixtures.users.len(),
            fixtures.study_groups.len(),
            fixtures.clubs.len(),
            fixtures.events.len(),
            fixtures.jobs.len()
        );
        Ok(fixtures)
    }

    pub fn user(&self, id: &EntityId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default_to_empty() {
        let fixtures = Fixtures::from_json(r#"{"joinedClubs": ["C1"], "rsvps": {"E1": "going"}}"#).unwrap();
        assert!(fixtures.users.is_empty());
        assert_eq!(fixtures.joined_clubs, vec![EntityId::from("C1")]);
        assert_eq!(fixtures.rsvps.get(&EntityId::from("E1")), Some(&RsvpStatus::Going));
    }

    #[test]
    fn test_bundled_fixture_file_parses() {
        let fixtures = Fixtures::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/data/fixtures.json")).unwrap();
        assert_eq!(fixtures.users.len(), 6);
        assert_eq!(fixtures.pending_requests[0].id.as_str(), "R1");
        assert!(fixtures.user(&EntityId::from("5")).is_some());
        assert_eq!(fixtures.unread_counts.get(&EntityId::from("3")), Some(&1));
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        assert!(matches!(
            Fixtures::from_path("/nonexistent/fixtures.json"),
            Err(AppError::Storage(_))
        ));
    }
}
