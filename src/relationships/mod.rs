// Relationship tracking - the signed-in user's edges to other entities

pub mod connections;
pub mod membership;
pub mod rsvp;

pub use connections::ConnectionBook;
pub use membership::MembershipSet;
pub use rsvp::{RsvpBook, RsvpTransition};

use crate::core::EntityId;
use crate::models::{Connection, RelationshipKind, RsvpStatus};

/// One store per relationship kind, all keyed by entity id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipTracker {
    pub connections: ConnectionBook,
    pub clubs: MembershipSet,
    pub groups: MembershipSet,
    pub rsvps: RsvpBook,
    pub saved_jobs: MembershipSet,
}

impl RelationshipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set-valued store behind a membership kind; `None` for connections and RSVPs
    pub fn memberships(&self, kind: RelationshipKind) -> Option<&MembershipSet> {
        match kind {
            RelationshipKind::ClubMembership => Some(&self.clubs),
            RelationshipKind::GroupMembership => Some(&self.groups),
            RelationshipKind::SavedJob => Some(&self.saved_jobs),
            RelationshipKind::Connection | RelationshipKind::EventRsvp => None,
        }
    }

    fn memberships_mut(&mut self, kind: RelationshipKind) -> Option<&mut MembershipSet> {
        match kind {
            RelationshipKind::ClubMembership => Some(&mut self.clubs),
            RelationshipKind::GroupMembership => Some(&mut self.groups),
            RelationshipKind::SavedJob => Some(&mut self.saved_jobs),
            RelationshipKind::Connection | RelationshipKind::EventRsvp => None,
        }
    }

    /// Flips membership of `entity_id` and returns the new state.
    /// Kinds without a boolean state return `None` and change nothing.
    pub fn toggle_membership(&mut self, kind: RelationshipKind, entity_id: &EntityId) -> Option<bool> {
        self.memberships_mut(kind).map(|set| set.toggle(entity_id))
    }

    pub fn is_member(&self, kind: RelationshipKind, entity_id: &EntityId) -> bool {
        self.memberships(kind)
            .map(|set| set.contains(entity_id))
            .unwrap_or(false)
    }

    pub fn set_rsvp(&mut self, event_id: &EntityId, status: RsvpStatus) -> Option<RsvpStatus> {
        self.rsvps.set_rsvp(event_id, status)
    }

    pub fn accept_connection_request(&mut self, connection_id: &EntityId) -> Option<&Connection> {
        self.connections.accept(connection_id)
    }

    pub fn decline_connection_request(&mut self, connection_id: &EntityId) -> bool {
        self.connections.decline(connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_membership_by_kind() {
        let mut tracker = RelationshipTracker::new();
        let club = EntityId::from("C1");
        assert_eq!(tracker.toggle_membership(RelationshipKind::ClubMembership, &club), Some(true));
        assert!(tracker.is_member(RelationshipKind::ClubMembership, &club));
        assert!(!tracker.is_member(RelationshipKind::GroupMembership, &club));
        assert_eq!(tracker.toggle_membership(RelationshipKind::EventRsvp, &club), None);
    }
}
