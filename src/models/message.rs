use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: EntityId,
    pub sender_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<EntityId>,
    pub content: String,
    pub created_at: Timestamp,
}

impl Message {
    /// The other party of a direct message, seen from `viewer`
    pub fn peer_of(&self, viewer: &EntityId) -> Option<&EntityId> {
        if &self.sender_id == viewer {
            self.receiver_id.as_ref()
        } else if self.receiver_id.as_ref() == Some(viewer) {
            Some(&self.sender_id)
        } else {
            None
        }
    }
}
