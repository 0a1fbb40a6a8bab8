use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Declined,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Declined => "declined",
        }
    }
}

/// Directed edge from `user_id` (requester) to `connected_user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: EntityId,
    pub user_id: EntityId,
    pub connected_user_id: EntityId,
    pub status: ConnectionStatus,
    pub created_at: Timestamp,
}

impl Connection {
    /// The endpoint that is not `viewer`
    pub fn counterpart(&self, viewer: &EntityId) -> &EntityId {
        if &self.user_id == viewer {
            &self.connected_user_id
        } else {
            &self.user_id
        }
    }

    pub fn links(&self, a: &EntityId, b: &EntityId) -> bool {
        (&self.user_id == a && &self.connected_user_id == b)
            || (&self.user_id == b && &self.connected_user_id == a)
    }
}
