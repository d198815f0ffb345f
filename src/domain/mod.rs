//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait definitions
//! - [`visit_event`] - Visit event model and non-blocking dispatcher
//! - [`visit_worker`] - Asynchronous visit persistence worker
//!
//! # Visit Processing Flow
//!
//! 1. A short token is resolved (cache hit or store read)
//! 2. A [`visit_event::VisitEvent`] is pushed onto a bounded channel (non-blocking)
//! 3. [`visit_worker::run_visit_worker`] persists it with retry on transient failures
//! 4. Failures are logged and dropped; the redirect has already been served

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
