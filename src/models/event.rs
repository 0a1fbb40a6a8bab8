use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::club::apply_clamped;
use crate::core::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Academic,
    Social,
    Career,
    Sports,
    Cultural,
    Volunteer,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Academic => "academic",
            EventCategory::Social => "social",
            EventCategory::Career => "career",
            EventCategory::Sports => "sports",
            EventCategory::Cultural => "cultural",
            EventCategory::Volunteer => "volunteer",
        }
    }
}

/// Attendance intent for one (user, event) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RsvpStatus {
    Going,
    Interested,
    NotGoing,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Going => "going",
            RsvpStatus::Interested => "interested",
            RsvpStatus::NotGoing => "not-going",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub university: String,
    pub organizer_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    pub current_attendees: u32,
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.max_attendees
            .map(|max| self.current_attendees >= max)
            .unwrap_or(false)
    }

    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    pub fn has_ended(&self, today: NaiveDate) -> bool {
        !self.is_upcoming(today)
    }

    pub fn format(&self) -> &'static str {
        if self.is_virtual {
            "virtual"
        } else {
            "in-person"
        }
    }

    pub fn adjust_attendees(&mut self, delta: i32) -> u32 {
        self.current_attendees = apply_clamped(self.current_attendees, delta);
        self.current_attendees
    }

    /// The link is only shown to attendees of virtual events
    pub fn meeting_link_for(&self, rsvp: Option<RsvpStatus>) -> Option<&str> {
        match rsvp {
            Some(RsvpStatus::Going) if self.is_virtual => self.meeting_link.as_deref(),
            _ => None,
        }
    }
}
