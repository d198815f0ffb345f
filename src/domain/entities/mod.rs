//! Core domain entities.
//!
//! - [`Link`] - A short token mapped to a long URL and its owner
//! - [`Visit`] - One recorded resolution of a link
//! - [`CachedLink`] - The redirect-relevant subset of a link held in the cache
//!
//! Creation inputs live in separate structs (`NewLink`, `NewVisit`).

pub mod link;
pub mod visit;

pub use link::{CachedLink, Link, NewLink};
pub use visit::{NewVisit, Visit};
