// Entity framework - what the store and the filter engine need to know about each record type

use chrono::NaiveDate;
use std::borrow::Cow;

use crate::core::EntityId;
use crate::models::EntityType;

pub mod ent_club;
pub mod ent_event;
pub mod ent_job;
pub mod ent_study_group;
pub mod ent_user;

/// Every stored record implements this
pub trait Entity: Clone + Send + Sync {
    fn entity_type() -> EntityType;

    fn entity_type_str() -> &'static str {
        Self::entity_type().as_str()
    }

    fn id(&self) -> &EntityId;
}

/// How a predicate value is compared against a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive equality, the way filter selectors are populated from facets
    Exact,
    /// Case-insensitive substring
    Contains,
    /// Boolean field; predicate is `true`/`false` or a common synonym
    Flag,
    /// ISO date equality or a relative window (`today`, `tomorrow`, `this-week`)
    Date,
}

/// Describes one filterable field of an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub mode: MatchMode,
    /// Facets for naturally ordered fields are sorted ascending instead of first-seen
    pub ordered: bool,
}

impl FieldSpec {
    pub const fn exact(name: &'static str) -> Self {
        Self { name, mode: MatchMode::Exact, ordered: false }
    }

    pub const fn contains(name: &'static str) -> Self {
        Self { name, mode: MatchMode::Contains, ordered: false }
    }

    pub const fn flag(name: &'static str) -> Self {
        Self { name, mode: MatchMode::Flag, ordered: false }
    }

    pub const fn date(name: &'static str) -> Self {
        Self { name, mode: MatchMode::Date, ordered: true }
    }

    pub const fn sorted(self) -> Self {
        Self { name: self.name, mode: self.mode, ordered: true }
    }
}

/// A borrowed view of a field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(i64),
    Flag(bool),
    Date(NaiveDate),
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }
}

/// Record types that can be searched, filtered and faceted
pub trait Filterable: Entity {
    /// Values the free-text query is matched against
    fn search_fields(&self) -> Vec<FieldValue<'_>>;

    /// Fields that accept predicates, in selector order
    fn filter_fields() -> &'static [FieldSpec];

    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    fn field_spec(name: &str) -> Option<&'static FieldSpec> {
        Self::filter_fields().iter().find(|spec| spec.name == name)
    }
}
