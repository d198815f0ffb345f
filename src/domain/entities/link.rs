//! Link entity representing a shortened URL owned by a client.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// A persisted short link.
///
/// Links are immutable after creation. The short token is globally unique
/// and each (long URL, owner) pair maps to at most one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub short_token: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_token: String,
        owner: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            short_token,
            owner,
            created_at,
        }
    }

    /// Returns true if `owner` created this link.
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner == owner
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub short_token: String,
    pub owner: String,
}

impl NewLink {
    /// Checks the store-level invariants that do not need a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any field is empty.
    pub fn validate(&self) -> Result<(), AppError> {
        let empty: Vec<&str> = [
            ("long_url", &self.long_url),
            ("short_token", &self.short_token),
            ("owner", &self.owner),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(AppError::bad_request(
                "Link fields must not be empty",
                json!({ "fields": empty }),
            ))
        }
    }
}

/// The part of a [`Link`] kept in the resolution cache.
///
/// Holds only what a redirect needs. Visit counts are never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLink {
    pub id: i64,
    pub long_url: String,
    pub short_token: String,
}

impl From<&Link> for CachedLink {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url.clone(),
            short_token: link.short_token.clone(),
        }
    }
}

impl From<Link> for CachedLink {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url,
            short_token: link.short_token,
        }
    }
}
