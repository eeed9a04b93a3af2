//! Persistence Adapters
//!
//! Implementations of the store port.

pub mod in_memory;
pub mod turso_store;

pub use in_memory::InMemoryStore;
pub use turso_store::TursoStore;
