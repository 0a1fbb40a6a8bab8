// Campus Graph - student network filtering and relationship state

// Core types and primitives
pub mod core;

// Domain records as delivered by the entity source
pub mod models;

// Entity framework - searchable and filterable record types
pub mod entities;

// Filtering and facet derivation
pub mod framework;

// Stores, caching, ids, change notification and optimistic sync
pub mod infrastructure;

// The signed-in user's edges: memberships, RSVPs, saved jobs, connections
pub mod relationships;

// Signed-in identity and its persistence
pub mod session;

// Page-level operations
pub mod services;

// Common utilities
pub mod app_state;
pub mod config;
pub mod data_seeder;
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
