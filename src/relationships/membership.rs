use std::collections::HashSet;

use crate::core::EntityId;

/// Set-valued relationship with a single boolean state per entity
/// (joined a club, joined a group, saved a job).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSet {
    members: HashSet<EntityId>,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns the new state
    pub fn toggle(&mut self, id: &EntityId) -> bool {
        if self.members.remove(id) {
            false
        } else {
            self.members.insert(id.clone());
            true
        }
    }

    pub fn insert(&mut self, id: EntityId) -> bool {
        self.members.insert(id)
    }

    pub fn remove(&mut self, id: &EntityId) -> bool {
        self.members.remove(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.members.iter()
    }
}

impl FromIterator<EntityId> for MembershipSet {
    fn from_iter<T: IntoIterator<Item = EntityId>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_reports_new_state() {
        let mut set = MembershipSet::new();
        let id = EntityId::from("C1");
        assert!(set.toggle(&id));
        assert!(set.contains(&id));
        assert!(!set.toggle(&id));
        assert!(set.is_empty());
    }
}
