//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenQuery, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::owner_cookie::{new_owner_token, owner_cookie_header, read_cookie};

/// Shortens a long URL for the calling client.
///
/// # Endpoint
///
/// `GET /?link=<url>`
///
/// # Ownership
///
/// The owner is taken from the owner cookie. A client without one is
/// assigned a fresh token, returned in a `Set-Cookie` header.
///
/// Repeating the request with the same URL and cookie returns the same token.
///
/// # Response
///
/// ```json
/// { "short": "aB3dE9fG" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `link` is missing or not a valid HTTP(S) URL.
/// Returns 503 Service Unavailable if the store is unreachable or no free
/// token could be allocated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ShortenQuery>,
) -> Result<Response, AppError> {
    query.validate()?;
    let long_url = query.link.ok_or_else(|| {
        AppError::bad_request("Missing 'link' query parameter", json!({ "field": "link" }))
    })?;

    let (owner, issued) = match read_cookie(&headers, &state.owner_cookie) {
        Some(owner) => (owner, false),
        None => (new_owner_token(), true),
    };

    let link = state.link_service.create_or_get(&long_url, &owner).await?;

    let mut response = Json(ShortenResponse {
        short: link.short_token,
    })
    .into_response();

    if issued {
        debug!(owner = %owner, "Issuing new owner token");
        if let Some(cookie) = owner_cookie_header(&state.owner_cookie, &owner) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }

    Ok(response)
}
