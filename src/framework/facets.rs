// Facets - distinct values per filterable field, used to populate selectors

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::entities::{FieldValue, Filterable};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum FacetKey {
    Flag(bool),
    Number(i64),
    Date(NaiveDate),
    Text(String),
}

impl FacetKey {
    fn render(self) -> String {
        match self {
            FacetKey::Flag(b) => b.to_string(),
            FacetKey::Number(n) => n.to_string(),
            FacetKey::Date(d) => d.to_string(),
            FacetKey::Text(s) => s,
        }
    }
}

/// Distinct values of `field` across `entities`.
///
/// First-seen order, except fields declared as ordered (years, dates) which
/// come back ascending. List fields contribute each element. Unknown fields
/// yield an empty list.
pub fn facet_values<'a, E, I>(entities: I, field: &str) -> Vec<String>
where
    E: Filterable + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let Some(spec) = E::field_spec(field) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for entity in entities {
        let Some(value) = entity.field(spec.name) else {
            continue;
        };
        let candidates = match value {
            FieldValue::Text(text) => vec![FacetKey::Text(text.into_owned())],
            FieldValue::Number(n) => vec![FacetKey::Number(n)],
            FieldValue::Flag(b) => vec![FacetKey::Flag(b)],
            FieldValue::Date(d) => vec![FacetKey::Date(d)],
            FieldValue::List(items) => items.iter().cloned().map(FacetKey::Text).collect(),
        };
        for key in candidates {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
    }

    if spec.ordered {
        keys.sort();
    }
    keys.into_iter().map(FacetKey::render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, Timestamp};
    use crate::models::{Event, User};
    use serde_json::json;

    fn user(id: &str, university: &str, year: i32) -> User {
        User {
            id: EntityId::from(id),
            email: String::new(),
            name: format!("Student {}", id),
            university: university.to_string(),
            major: "Undeclared".to_string(),
            graduation_year: year,
            bio: String::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            profile_image: None,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_text_facets_keep_first_seen_order() {
        let users = vec![
            user("1", "Stanford University", 2025),
            user("2", "UC Berkeley", 2024),
            user("3", "Stanford University", 2026),
            user("4", "MIT", 2025),
        ];
        assert_eq!(
            facet_values(&users, "university"),
            vec!["Stanford University", "UC Berkeley", "MIT"]
        );
    }

    #[test]
    fn test_year_facets_sort_numerically() {
        let users = vec![user("1", "A", 2025), user("2", "A", 2024), user("3", "A", 2100), user("4", "A", 2025)];
        assert_eq!(facet_values(&users, "graduation_year"), vec!["2024", "2025", "2100"]);
    }

    #[test]
    fn test_event_date_facets_sort_ascending() {
        let event = |id: &str, date: &str| -> Event {
            serde_json::from_value(json!({
                "id": id,
                "title": "Meetup",
                "description": "",
                "category": "social",
                "date": date,
                "time": "18:00",
                "location": "Quad",
                "university": "Stanford University",
                "organizerId": "1",
                "currentAttendees": 0,
                "isVirtual": false,
                "createdAt": "2024-01-01T00:00:00Z"
            }))
            .unwrap()
        };
        let events = vec![
            event("E1", "2024-02-15"),
            event("E2", "2024-02-10"),
            event("E3", "2024-02-20"),
            event("E4", "2024-02-10"),
            event("E5", "2023-12-31"),
        ];
        assert_eq!(
            facet_values(&events, "date"),
            vec!["2023-12-31", "2024-02-10", "2024-02-15", "2024-02-20"]
        );
    }

    #[test]
    fn test_unknown_field_has_no_facets() {
        let users = vec![user("1", "A", 2025)];
        assert!(facet_values(&users, "nickname").is_empty());
    }
}
