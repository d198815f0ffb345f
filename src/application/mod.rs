//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and the resolution
//! cache, and expose the operations the HTTP handlers call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Idempotent short link creation
//! - [`services::redirect_service::RedirectService`] - Cached token resolution and visit dispatch
//! - [`services::stats_service::StatsService`] - Visit counts and per-owner summaries

pub mod services;
