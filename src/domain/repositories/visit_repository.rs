//! Repository trait for visit recording and visit statistics.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A link together with its all-time visit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSummary {
    pub link_id: i64,
    pub long_url: String,
    pub short_token: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: i64,
}

/// Repository interface for visits.
///
/// Counts are always computed from stored visits, never from cached state.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends a visit for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Counts visits of a link, restricted to `[from, to)` when bounds are given.
    async fn count_visits(
        &self,
        link_id: i64,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError>;

    /// Lists an owner's links in creation order with all-time visit totals.
    async fn summaries_by_owner(&self, owner: &str) -> Result<Vec<LinkSummary>, AppError>;

    /// Counts all visits.
    async fn count_all(&self) -> Result<i64, AppError>;
}
