//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use crate::api::dto::stats::{LinkStatsResponse, StatsQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::owner_cookie::read_cookie;

/// Returns visit statistics for one of the caller's links.
///
/// # Endpoint
///
/// `GET /stats/{token}?day=true&month=true`
///
/// # Query Parameters
///
/// - `day` - Include visits in the last 24 hours
/// - `month` - Include visits in the last calendar month
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown, belongs to another owner,
/// or the caller has no owner cookie. The three cases are indistinguishable.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    Query(query): Query<StatsQuery>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let owner = read_cookie(&headers, &state.owner_cookie).ok_or(AppError::NotFoundOrNotOwner)?;

    let report = state
        .stats_service
        .link_stats(&owner, &token, query.into())
        .await?;

    Ok(Json(report.into()))
}
