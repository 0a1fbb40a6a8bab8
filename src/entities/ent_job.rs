use super::{Entity, FieldSpec, FieldValue, Filterable};
use crate::core::EntityId;
use crate::models::{EntityType, JobOpportunity};

const JOB_FIELDS: &[FieldSpec] = &[
    FieldSpec::exact("type"),
    FieldSpec::contains("location"),
    FieldSpec::contains("company"),
];

impl Entity for JobOpportunity {
    fn entity_type() -> EntityType {
        EntityType::JobOpportunity
    }

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for JobOpportunity {
    fn search_fields(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::text(&self.title),
            FieldValue::text(&self.company),
            FieldValue::text(&self.description),
            FieldValue::List(&self.requirements),
        ]
    }

    fn filter_fields() -> &'static [FieldSpec] {
        JOB_FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "type" => Some(FieldValue::text(self.job_type.as_str())),
            "location" => Some(FieldValue::text(&self.location)),
            "company" => Some(FieldValue::text(&self.company)),
            _ => None,
        }
    }
}
