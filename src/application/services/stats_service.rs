//! Visit statistics service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Months, Utc};
use serde_json::json;

use crate::domain::repositories::{LinkRepository, LinkSummary, VisitRepository};
use crate::error::AppError;

/// Which rolling windows to compute besides the all-time total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsWindows {
    pub include_day: bool,
    pub include_month: bool,
}

/// Statistics for a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStatsReport {
    pub link_id: i64,
    pub long_url: String,
    pub short_token: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: i64,
    /// Visits in `[now - 1 day, now)`, when requested.
    pub per_day: Option<i64>,
    /// Visits in `[now - 1 calendar month, now)`, when requested.
    pub per_month: Option<i64>,
}

/// Service computing visit counts.
///
/// All counts come from stored visits. Visits still waiting in the queue are
/// not yet visible.
pub struct StatsService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L, V> StatsService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Counts visits of a link inside the half-open window `[from, to)`.
    ///
    /// A missing bound leaves that side open.
    pub async fn link_visit_count(
        &self,
        link_id: i64,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        self.visit_repository.count_visits(link_id, from, to).await
    }

    /// Lists an owner's links in creation order with all-time visit totals.
    pub async fn owner_link_summaries(&self, owner: &str) -> Result<Vec<LinkSummary>, AppError> {
        self.visit_repository.summaries_by_owner(owner).await
    }

    /// Returns statistics for the link `short_token` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFoundOrNotOwner`] both when the token is unknown
    /// and when it belongs to another owner.
    pub async fn link_stats(
        &self,
        owner: &str,
        short_token: &str,
        windows: StatsWindows,
    ) -> Result<LinkStatsReport, AppError> {
        self.link_stats_at(owner, short_token, windows, Utc::now())
            .await
    }

    /// Same as [`Self::link_stats`] with an explicit "now".
    pub async fn link_stats_at(
        &self,
        owner: &str,
        short_token: &str,
        windows: StatsWindows,
        now: DateTime<Utc>,
    ) -> Result<LinkStatsReport, AppError> {
        let link = self
            .link_repository
            .find_by_short_token(short_token)
            .await?
            .filter(|link| link.is_owned_by(owner))
            .ok_or(AppError::NotFoundOrNotOwner)?;

        let total_visits = self.link_visit_count(link.id, None, None).await?;

        let per_day = if windows.include_day {
            let start = now - Duration::days(1);
            Some(self.link_visit_count(link.id, Some(start), Some(now)).await?)
        } else {
            None
        };

        let per_month = if windows.include_month {
            let start = now.checked_sub_months(Months::new(1)).ok_or_else(|| {
                AppError::internal("Month window out of range", json!({ "now": now }))
            })?;
            Some(self.link_visit_count(link.id, Some(start), Some(now)).await?)
        } else {
            None
        };

        Ok(LinkStatsReport {
            link_id: link.id,
            long_url: link.long_url,
            short_token: link.short_token,
            created_at: link.created_at,
            total_visits,
            per_day,
            per_month,
        })
    }

    /// Total links and visits, for operational summaries.
    pub async fn totals(&self) -> Result<(i64, i64), AppError> {
        let links = self.link_repository.count().await?;
        let visits = self.visit_repository.count_all().await?;
        Ok((links, visits))
    }
}
