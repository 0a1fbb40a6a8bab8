use super::{Entity, FieldSpec, FieldValue, Filterable};
use crate::core::EntityId;
use crate::models::{Club, EntityType};

const CLUB_FIELDS: &[FieldSpec] = &[
    FieldSpec::exact("category"),
    FieldSpec::exact("university"),
    FieldSpec::flag("is_active"),
];

impl Entity for Club {
    fn entity_type() -> EntityType {
        EntityType::Club
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for Club {
    fn search_fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.name),
            FieldValue::text(&self.description),
            FieldValue::List(&self.tags),
        ]
    }

    fn filter_fields() -> &'static [FieldSpec] {
        CLUB_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::text(&self.category)),
            "university" => Some(FieldValue::text(&self.university)),
            "is_active" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }
}
