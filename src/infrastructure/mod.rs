// Core infrastructure modules
pub mod cache;                 // LRU facet cache
pub mod entity_store;          // Per-type authoritative collections
pub mod id_generator;          // Ids for locally created records
pub mod notifier;              // State change channel
pub mod optimistic;            // Apply, commit, roll back
pub mod traits;                // Infrastructure traits

pub use cache::{Cache, FacetCache};
pub use entity_store::{EntityStore, DEFAULT_FACET_CAPACITY};
pub use id_generator::IdGenerator;
pub use notifier::{ChangeNotifier, StateChange};
pub use optimistic::{run_optimistic, Mutation};
pub use traits::{LocalOnlySink, MutationSink, SessionStoreExt};
