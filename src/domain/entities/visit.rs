//! Visit entity representing one successful resolution of a short token.

use chrono::{DateTime, Utc};

/// A recorded visit. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(id: i64, link_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            link_id,
            created_at,
        }
    }
}

/// Input data for recording a visit.
///
/// `link_id` must reference an existing link; the store enforces it.
/// `created_at` is the moment the redirect was served, not the moment the
/// background write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVisit {
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
}
