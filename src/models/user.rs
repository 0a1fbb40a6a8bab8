use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Timestamp};

/// A student profile as supplied by the entity source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub university: String,
    pub major: String,
    pub graduation_year: i32,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

/// Partial profile update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub profile_image: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(university) = update.university {
            self.university = university;
        }
        if let Some(major) = update.major {
            self.major = major;
        }
        if let Some(year) = update.graduation_year {
            self.graduation_year = year;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(interests) = update.interests {
            self.interests = interests;
        }
        if update.profile_image.is_some() {
            self.profile_image = update.profile_image;
        }
    }
}
