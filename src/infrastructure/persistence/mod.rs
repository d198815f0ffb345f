//! PostgreSQL repository implementations.
//!
//! Queries are plain runtime-checked SQL through `sqlx`; the schema lives in
//! `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and lookup
//! - [`PgVisitRepository`] - Visit recording and counting

pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
