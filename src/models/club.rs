use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub university: String,
    pub member_count: u32,
    pub is_active: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meeting_schedule: String,
    #[serde(default)]
    pub contact_email: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClub {
    pub name: String,
    pub description: String,
    pub category: String,
    pub university: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meeting_schedule: String,
    #[serde(default)]
    pub contact_email: String,
}

impl Club {
    /// Applies a join (+1) or leave (-1); the count never drops below zero.
    pub fn adjust_member_count(&mut self, delta: i32) -> u32 {
        self.member_count = apply_clamped(self.member_count, delta);
        self.member_count
    }
}

pub(crate) fn apply_clamped(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
