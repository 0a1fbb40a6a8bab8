// RSVP book - single-valued attendance intent per event
//
// States: none, going, interested, not-going. Choosing the held status again
// clears it; any other choice overwrites. "No entry" and not-going read the same.

use std::collections::HashMap;

use crate::core::EntityId;
use crate::models::RsvpStatus;

/// Before/after view of one RSVP change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpTransition {
    pub previous: Option<RsvpStatus>,
    pub current: Option<RsvpStatus>,
}

impl RsvpTransition {
    /// Change to apply to the event's attendee counter
    pub fn attendee_delta(&self) -> i32 {
        let was_going = self.previous == Some(RsvpStatus::Going);
        let is_going = self.current == Some(RsvpStatus::Going);
        match (was_going, is_going) {
            (false, true) => 1,
            (true, false) => -1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpBook {
    statuses: HashMap<EntityId, RsvpStatus>,
}

impl RsvpBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle-or-overwrite; returns the status now held, `None` if cleared
    pub fn set_rsvp(&mut self, event_id: &EntityId, status: RsvpStatus) -> Option<RsvpStatus> {
        self.transition(event_id, status).current
    }

    pub fn transition(&mut self, event_id: &EntityId, status: RsvpStatus) -> RsvpTransition {
        let previous = self.statuses.get(event_id).copied();
        let current = if previous == Some(status) {
            self.statuses.remove(event_id);
            None
        } else {
            self.statuses.insert(event_id.clone(), status);
            Some(status)
        };
        RsvpTransition { previous, current }
    }

    /// Raw stored status, including an explicit not-going
    pub fn status(&self, event_id: &EntityId) -> Option<RsvpStatus> {
        self.statuses.get(event_id).copied()
    }

    /// Stored status with not-going folded into "none"
    pub fn effective_status(&self, event_id: &EntityId) -> Option<RsvpStatus> {
        self.status(event_id).filter(|s| *s != RsvpStatus::NotGoing)
    }

    /// Going or interested - what the "my events" tab lists
    pub fn is_engaged(&self, event_id: &EntityId) -> bool {
        self.effective_status(event_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl FromIterator<(EntityId, RsvpStatus)> for RsvpBook {
    fn from_iter<T: IntoIterator<Item = (EntityId, RsvpStatus)>>(iter: T) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_status_twice_clears() {
        let mut book = RsvpBook::new();
        let e1 = EntityId::from("E1");
        assert_eq!(book.set_rsvp(&e1, RsvpStatus::Going), Some(RsvpStatus::Going));
        assert_eq!(book.set_rsvp(&e1, RsvpStatus::Going), None);
        assert!(book.is_empty());
    }

    #[test]
    fn test_switching_between_going_and_interested_overwrites() {
        let mut book = RsvpBook::new();
        let e1 = EntityId::from("E1");
        let first = book.transition(&e1, RsvpStatus::Going);
        assert_eq!(first.attendee_delta(), 1);
        let second = book.transition(&e1, RsvpStatus::Interested);
        assert_eq!(second.previous, Some(RsvpStatus::Going));
        assert_eq!(second.current, Some(RsvpStatus::Interested));
        assert_eq!(second.attendee_delta(), -1);
        let third = book.transition(&e1, RsvpStatus::Interested);
        assert_eq!(third.current, None);
        assert_eq!(third.attendee_delta(), 0);
    }

    #[test]
    fn test_not_going_reads_as_none() {
        let mut book = RsvpBook::new();
        let e1 = EntityId::from("E1");
        book.set_rsvp(&e1, RsvpStatus::NotGoing);
        assert_eq!(book.status(&e1), Some(RsvpStatus::NotGoing));
        assert_eq!(book.effective_status(&e1), None);
        assert!(!book.is_engaged(&e1));
    }
}
