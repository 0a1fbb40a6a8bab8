use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Public,
    Private,
    UniversityOnly,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::UniversityOnly => "university-only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Admin,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: EntityId,
    pub user_id: EntityId,
    pub group_id: EntityId,
    pub role: GroupRole,
    pub joined_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroup {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub course: String,
    pub university: String,
    pub visibility: Visibility,
    pub creator_id: EntityId,
    #[serde(default)]
    pub members: Vec<GroupMember>,
    pub created_at: Timestamp,
}

/// Form data for "Create Group"; the id, creator and members are filled in on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyGroup {
    pub name: String,
    pub description: String,
    pub course: String,
    pub university: String,
    pub visibility: Visibility,
}

impl StudyGroup {
    pub fn has_member(&self, user_id: &EntityId) -> bool {
        self.members.iter().any(|m| &m.user_id == user_id)
    }

    /// Discoverability policy for group listings.
    ///
    /// Public groups are listed for everyone. University-only groups are listed
    /// for viewers at the same university. Private groups are listed only for
    /// their members. Members always see their own groups.
    pub fn visible_to(&self, viewer: Option<(&EntityId, &str)>) -> bool {
        match (self.visibility, viewer) {
            (Visibility::Public, _) => true,
            (_, None) => false,
            (_, Some((id, _))) if self.has_member(id) => true,
            (Visibility::UniversityOnly, Some((_, university))) => self.university == university,
            (Visibility::Private, Some(_)) => false,
        }
    }
}
