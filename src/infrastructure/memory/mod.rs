//! In-process store implementations.
//!
//! - [`InMemoryStore`] - Link and visit store with the same constraint
//!   semantics as the PostgreSQL schema

mod in_memory_store;

pub use in_memory_store::InMemoryStore;
