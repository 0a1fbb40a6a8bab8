// ID Generator - collision-free ids for entities created on this device
//
// Ids from the entity source are kept as-is; only locally created records
// (groups, clubs, connection requests, messages, registrations) go through here.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::core::EntityId;

#[derive(Debug)]
enum IdStrategy {
    /// Random v4 UUIDs; cannot collide with source-assigned ids
    Uuid,
    /// `<prefix>-<n>` with a monotonically increasing counter
    Sequence { prefix: String },
}

#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    sequence: AtomicU64,
}

impl IdGenerator {
    pub fn uuid() -> Self {
        Self {
            strategy: IdStrategy::Uuid,
            sequence: AtomicU64::new(0),
        }
    }

    /// Deterministic ids, mainly for tests and fixtures
    pub fn sequential(prefix: impl Into<String>) -> Self {
        Self {
            strategy: IdStrategy::Sequence {
                prefix: prefix.into(),
            },
            sequence: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> EntityId {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        match &self.strategy {
            IdStrategy::Uuid => EntityId::new(Uuid::new_v4().to_string()),
            IdStrategy::Sequence { prefix } => EntityId::new(format!("{}-{}", prefix, n)),
        }
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::uuid()
    }
}
