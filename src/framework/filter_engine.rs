// Filter Engine - free-text search plus per-field predicates over an entity collection
//
// Every call recomputes from scratch; collections are small and callers re-filter
// on each keystroke or selector change.

use chrono::{Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::warn;

use crate::entities::{FieldSpec, FieldValue, Filterable, MatchMode};

/// The search box and filter selectors of one listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub text: String,
    pub predicates: BTreeMap<String, String>,
    /// Reference date for relative date windows; defaults to today (UTC)
    pub today: Option<NaiveDate>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.insert(field.into(), value.into());
        self
    }

    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// True when neither the text nor any predicate restricts the result
    pub fn is_unrestricted(&self) -> bool {
        self.text.is_empty() && self.predicates.values().all(|v| v.is_empty())
    }
}

/// Returns the entities matching `query`, in input order.
///
/// The text query is a case-insensitive substring test over the type's
/// searchable fields (any element of list fields). Predicates with an empty
/// value are ignored. A predicate on a field the type does not expose matches
/// nothing.
pub fn filter<'a, E, I>(entities: I, query: &FilterQuery) -> Vec<&'a E>
where
    E: Filterable + 'a,
    I: IntoIterator<Item = &'a E>,
{
    if query.is_unrestricted() {
        return entities.into_iter().collect();
    }
    let needle = query.text.to_lowercase();
    let today = query.reference_date();

    let mut active: Vec<(&FieldSpec, &str)> = Vec::new();
    for (field, value) in &query.predicates {
        if value.is_empty() {
            continue;
        }
        match E::field_spec(field) {
            Some(spec) => active.push((spec, value.as_str())),
            None => {
                warn!("{} has no filterable field '{}'", E::entity_type_str(), field);
                return Vec::new();
            }
        }
    }

    entities
        .into_iter()
        .filter(|entity| matches_text(*entity, &needle))
        .filter(|entity| {
            active.iter().all(|(spec, value)| {
                entity
                    .field(spec.name)
                    .map(|field| matches_predicate(&field, spec.mode, value, today))
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// `needle` must already be lowercase
pub fn matches_text<E: Filterable>(entity: &E, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entity
        .search_fields()
        .iter()
        .any(|field| field_contains(field, needle))
}

pub(crate) fn text_contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

fn field_contains(field: &FieldValue<'_>, needle: &str) -> bool {
    match field {
        FieldValue::Text(text) => text_contains(text, needle),
        FieldValue::List(items) => items.iter().any(|item| text_contains(item, needle)),
        FieldValue::Number(n) => n.to_string().contains(needle),
        FieldValue::Date(d) => d.to_string().contains(needle),
        FieldValue::Flag(_) => false,
    }
}

fn matches_predicate(field: &FieldValue<'_>, mode: MatchMode, value: &str, today: NaiveDate) -> bool {
    match mode {
        MatchMode::Exact => match field {
            FieldValue::Text(text) => text.as_ref() == value,
            FieldValue::List(items) => items.iter().any(|item| item == value),
            FieldValue::Number(n) => n.to_string() == value,
            FieldValue::Date(d) => d.to_string() == value,
            FieldValue::Flag(b) => parse_flag(value) == Some(*b),
        },
        MatchMode::Contains => field_contains(field, &value.to_lowercase()),
        MatchMode::Flag => match field {
            FieldValue::Flag(b) => parse_flag(value) == Some(*b),
            _ => false,
        },
        MatchMode::Date => match field {
            FieldValue::Date(d) => date_matches(*d, value, today),
            _ => false,
        },
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "active" => Some(true),
        "false" | "no" | "0" | "inactive" => Some(false),
        _ => None,
    }
}

fn date_matches(date: NaiveDate, value: &str, today: NaiveDate) -> bool {
    match value.to_lowercase().as_str() {
        "today" => date == today,
        "tomorrow" => date == today + Duration::days(1),
        "this-week" => date >= today && date <= today + Duration::days(7),
        "upcoming" => date >= today,
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map(|parsed| parsed == date)
            .unwrap_or(false),
    }
}
