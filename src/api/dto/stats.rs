//! DTOs for per-link statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{LinkStatsReport, StatsWindows};

/// Optional rolling windows, e.g. `?day=true&month=true`.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub day: bool,
    #[serde(default)]
    pub month: bool,
}

impl From<StatsQuery> for StatsWindows {
    fn from(query: StatsQuery) -> Self {
        Self {
            include_day: query.day,
            include_month: query.month,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub long_url: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_day: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_month: Option<i64>,
}

impl From<LinkStatsReport> for LinkStatsResponse {
    fn from(report: LinkStatsReport) -> Self {
        Self {
            long_url: report.long_url,
            short: report.short_token,
            created_at: report.created_at,
            total_visits: report.total_visits,
            per_day: report.per_day,
            per_month: report.per_month,
        }
    }
}
