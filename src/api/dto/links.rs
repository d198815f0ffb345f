//! DTOs for the owner's link listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::repositories::LinkSummary;

/// Message returned when the client has no owner token yet.
pub const NO_LINKS_MESSAGE: &str = "You haven't shortened any links";

#[derive(Debug, Serialize)]
pub struct MyLinksResponse {
    pub mylinks: Vec<LinkSummaryItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MyLinksResponse {
    pub fn empty() -> Self {
        Self {
            mylinks: Vec::new(),
            message: Some(NO_LINKS_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkSummaryItem {
    pub long_url: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: i64,
}

impl From<LinkSummary> for LinkSummaryItem {
    fn from(summary: LinkSummary) -> Self {
        Self {
            long_url: summary.long_url,
            short: summary.short_token,
            created_at: summary.created_at,
            total_visits: summary.total_visits,
        }
    }
}
