use super::{Entity, FieldSpec, FieldValue, Filterable};
use crate::core::EntityId;
use crate::models::{EntityType, StudyGroup};

const GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::exact("course"),
    FieldSpec::exact("university"),
    FieldSpec::exact("visibility"),
];

impl Entity for StudyGroup {
    fn entity_type() -> EntityType {
        EntityType::StudyGroup
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for StudyGroup {
    fn search_fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.name),
            FieldValue::text(&self.course),
            FieldValue::text(&self.description),
        ]
    }

    fn filter_fields() -> &'static [FieldSpec] {
        GROUP_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "course" => Some(FieldValue::text(&self.course)),
            "university" => Some(FieldValue::text(&self.university)),
            "visibility" => Some(FieldValue::text(self.visibility.as_str())),
            _ => None,
        }
    }
}
