// Framework - filtering and facet derivation shared by every listing

pub mod facets;
pub mod filter_engine;

pub use facets::facet_values;
pub use filter_engine::{filter, FilterQuery};
