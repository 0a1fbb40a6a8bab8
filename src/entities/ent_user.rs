// User - discover page search and filters

use super::{Entity, FieldSpec, FieldValue, Filterable};
use crate::core::EntityId;
use crate::models::{EntityType, User};

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::exact("university"),
    FieldSpec::exact("major"),
    FieldSpec::exact("graduation_year").sorted(),
];

impl Entity for User {
    fn entity_type() -> EntityType {
        EntityType::User
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for User {
    fn search_fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.name),
            FieldValue::text(&self.major),
            FieldValue::text(&self.university),
            FieldValue::List(&self.skills),
        ]
    }

    fn filter_fields() -> &'static [FieldSpec] {
        USER_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "university" => Some(FieldValue::text(&self.university)),
            "major" => Some(FieldValue::text(&self.major)),
            "graduation_year" => Some(FieldValue::Number(self.graduation_year as i64)),
            _ => None,
        }
    }
}
