//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /?link=<url>`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenQuery {
    /// The long URL to shorten. A missing scheme defaults to `http://`.
    #[validate(
        required(message = "Missing 'link' query parameter"),
        length(min = 1, max = 2048, message = "Link must be 1-2048 characters")
    )]
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short: String,
}
