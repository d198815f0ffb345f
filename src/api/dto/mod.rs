//! Data Transfer Objects for requests and responses.
//!
//! All DTOs use Serde for serialization. Query input is checked with
//! validator where it carries constraints.

pub mod health;
pub mod links;
pub mod shorten;
pub mod stats;
