// Event - the events page filters on category, location, format and a date window

use super::{Entity, FieldSpec, FieldValue, Filterable};
use crate::core::EntityId;
use crate::models::{EntityType, Event};

const EVENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::exact("category"),
    FieldSpec::exact("university"),
    FieldSpec::contains("location"),
    FieldSpec::exact("format"),
    FieldSpec::date("date"),
];

impl Entity for Event {
    fn entity_type() -> EntityType {
        EntityType::Event
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for Event {
    fn search_fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.title),
            FieldValue::text(&self.description),
            FieldValue::List(&self.tags),
        ]
    }

    fn filter_fields() -> &'static [FieldSpec] {
        EVENT_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::text(self.category.as_str())),
            "university" => Some(FieldValue::text(&self.university)),
            "location" => Some(FieldValue::text(&self.location)),
            "format" => Some(FieldValue::text(self.format())),
            "date" => Some(FieldValue::Date(self.date)),
            _ => None,
        }
    }
}
