pub mod campus_service;
pub mod messaging;

pub use campus_service::{
    CampusService, CampusState, ClubMembershipChange, ConnectionTab, EventTab, JobTab, MembershipTab,
    RsvpChange,
};
pub use messaging::{Conversation, Inbox};
