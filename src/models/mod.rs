// Domain records for the campus graph - everything the entity source hands us

pub mod club;
pub mod connection;
pub mod event;
pub mod job;
pub mod message;
pub mod study_group;
pub mod user;

pub use club::{Club, NewClub};
pub use connection::{Connection, ConnectionStatus};
pub use event::{Event, EventCategory, RsvpStatus};
pub use job::{JobOpportunity, JobType};
pub use message::Message;
pub use study_group::{GroupMember, GroupRole, NewStudyGroup, StudyGroup, Visibility};
pub use user::{ProfileUpdate, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityType {
    User,
    Connection,
    StudyGroup,
    Club,
    Event,
    JobOpportunity,
    Message,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Connection => "connection",
            EntityType::StudyGroup => "study_group",
            EntityType::Club => "club",
            EntityType::Event => "event",
            EntityType::JobOpportunity => "job_opportunity",
            EntityType::Message => "message",
        }
    }
}

/// Relationship kinds tracked for the signed-in user
#[derive(Debug, Clone, PartialEq, Copy, Hash, Eq, serde::Serialize, serde::Deserialize)]
pub enum RelationshipKind {
    Connection,
    ClubMembership,
    GroupMembership,
    EventRsvp,
    SavedJob,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Connection => "connection",
            RelationshipKind::ClubMembership => "club_membership",
            RelationshipKind::GroupMembership => "group_membership",
            RelationshipKind::EventRsvp => "event_rsvp",
            RelationshipKind::SavedJob => "saved_job",
        }
    }
}
