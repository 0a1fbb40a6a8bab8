// Entity Store - the authoritative in-memory list for one entity type

use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

use crate::core::EntityId;
use crate::entities::Filterable;
use crate::error::{AppError, AppResult};
use crate::framework::{facet_values, filter, FilterQuery};
use crate::infrastructure::cache::FacetCache;

pub const DEFAULT_FACET_CAPACITY: usize = 16;

/// Ordered collection of one entity type plus memoised facets.
///
/// Entities are replaced wholesale on load or prepended on local creation.
/// There is no removal. Every mutation bumps the revision and drops the facet
/// cache.
pub struct EntityStore<E: Filterable> {
    entities: Vec<E>,
    facets: FacetCache,
    revision: u64,
}

impl<E: Filterable> EntityStore<E> {
    pub fn new(facet_capacity: usize) -> Self {
        Self {
            entities: Vec::new(),
            facets: FacetCache::new(facet_capacity),
            revision: 0,
        }
    }

    /// Replace the whole collection. Rejects blank or duplicate ids.
    pub fn load(&mut self, entities: Vec<E>) -> AppResult<usize> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if !entity.id().is_valid() {
                return Err(AppError::Validation(format!(
                    "{} with blank id",
                    E::entity_type_str()
                )));
            }
            if !seen.insert(entity.id().clone()) {
                return Err(AppError::Validation(format!(
                    "duplicate {} id {}",
                    E::entity_type_str(),
                    entity.id()
                )));
            }
        }

        self.entities = entities;
        self.touch();
        info!(
            "Loaded {} {} records (revision {})",
            self.entities.len(),
            E::entity_type_str(),
            self.revision
        );
        Ok(self.entities.len())
    }

    /// Insert a locally created entity at the front of the list
    pub fn prepend(&mut self, entity: E) -> AppResult<&E> {
        if !entity.id().is_valid() {
            return Err(AppError::Validation(format!(
                "{} with blank id",
                E::entity_type_str()
            )));
        }
        if self.contains(entity.id()) {
            return Err(AppError::Conflict(format!(
                "{} {} already exists",
                E::entity_type_str(),
                entity.id()
            )));
        }

        debug!("Prepending {} {}", E::entity_type_str(), entity.id());
        self.entities.insert(0, entity);
        self.touch();
        Ok(&self.entities[0])
    }

    /// Mutate one entity in place; the closure must not change its id
    pub fn update<T>(&mut self, id: &EntityId, f: impl FnOnce(&mut E) -> T) -> AppResult<T> {
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("{} {}", E::entity_type_str(), id)))?;
        let out = f(entity);
        self.touch();
        Ok(out)
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn filter(&self, query: &FilterQuery) -> Vec<&E> {
        filter(&self.entities, query)
    }

    /// Distinct values for one filter selector, memoised until the next mutation
    pub fn facets(&mut self, field: &str) -> Vec<String> {
        let key = field.to_string();
        if let Some(cached) = self.facets.get(&key) {
            return cached.clone();
        }
        let values = facet_values(&self.entities, field);
        self.facets.insert(key, values.clone());
        values
    }

    /// Facets for every filterable field of the type, in selector order
    pub fn all_facets(&mut self) -> Vec<(&'static str, Vec<String>)> {
        E::filter_fields()
            .iter()
            .map(|spec| (spec.name, self.facets(spec.name)))
            .collect()
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.facets.clear();
    }
}

impl<E: Filterable> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new(DEFAULT_FACET_CAPACITY)
    }
}

// Facets are derived data, so a clone starts with a cold cache
impl<E: Filterable> Clone for EntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
            facets: FacetCache::new(self.facets.capacity()),
            revision: self.revision,
        }
    }
}

impl<E: Filterable + fmt::Debug> fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("entity_type", &E::entity_type_str())
            .field("len", &self.entities.len())
            .field("revision", &self.revision)
            .field("cached_facets", &self.facets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Timestamp;
    use crate::models::Club;

    fn club(id: &str, category: &str, members: u32) -> Club {
        Club {
            id: EntityId::from(id),
            name: format!("Club {}", id),
            description: String::new(),
            category: category.to_string(),
            university: "Stanford University".to_string(),
            member_count: members,
            is_active: true,
            tags: Vec::new(),
            meeting_schedule: String::new(),
            contact_email: String::new(),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let mut store = EntityStore::default();
        let err = store
            .load(vec![club("1", "Tech", 10), club("1", "Arts", 5)])
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_prepend_puts_new_entity_first() {
        let mut store = EntityStore::default();
        store.load(vec![club("1", "Tech", 10)]).unwrap();
        store.prepend(club("2", "Arts", 1)).unwrap();
        let ids: Vec<_> = store.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(matches!(
            store.prepend(club("1", "Tech", 1)),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_facet_cache_is_invalidated_on_mutation() {
        let mut store = EntityStore::default();
        store.load(vec![club("1", "Tech", 10)]).unwrap();
        assert_eq!(store.facets("category"), vec!["Tech"]);
        store.prepend(club("2", "Arts", 1)).unwrap();
        assert_eq!(store.facets("category"), vec!["Arts", "Tech"]);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store: EntityStore<Club> = EntityStore::default();
        let result = store.update(&EntityId::from("nope"), |c| c.adjust_member_count(1));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_clone_keeps_entities_and_revision() {
        let mut store = EntityStore::default();
        store.load(vec![club("1", "Tech", 10)]).unwrap();
        let snapshot = store.clone();
        store.update(&EntityId::from("1"), |c| c.adjust_member_count(1)).unwrap();
        assert_eq!(snapshot.get(&EntityId::from("1")).unwrap().member_count, 10);
        assert_eq!(snapshot.revision() + 1, store.revision());
    }
}
