//! Helpers shared across layers.
//!
//! - [`token_generator`] - Short token generation
//! - [`url_normalizer`] - Long URL normalization and validation
//! - [`owner_cookie`] - Owner token cookie parsing and issuance
//! - [`db_error`] - Database error mapping

pub mod db_error;
pub mod owner_cookie;
pub mod token_generator;
pub mod url_normalizer;
