//! Handler listing the caller's links.

use axum::{Json, extract::State, http::HeaderMap};

use crate::api::dto::links::{LinkSummaryItem, MyLinksResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::owner_cookie::read_cookie;

/// Lists the links created with the caller's owner token.
///
/// # Endpoint
///
/// `GET /mylinks`
///
/// # Response
///
/// ```json
/// {
///   "mylinks": [
///     {
///       "long_url": "http://example.com/page",
///       "short": "aB3dE9fG",
///       "created_at": "2024-06-01T12:00:00Z",
///       "total_visits": 3
///     }
///   ]
/// }
/// ```
///
/// A client without an owner cookie gets an empty list and a `message`.
pub async fn my_links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MyLinksResponse>, AppError> {
    let Some(owner) = read_cookie(&headers, &state.owner_cookie) else {
        return Ok(Json(MyLinksResponse::empty()));
    };

    let summaries = state.stats_service.owner_link_summaries(&owner).await?;

    Ok(Json(MyLinksResponse {
        mylinks: summaries.into_iter().map(LinkSummaryItem::from).collect(),
        message: None,
    }))
}
