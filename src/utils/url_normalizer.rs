//! Long URL normalization applied before links are looked up or created.
//!
//! The normalized form is the idempotence key together with the owner, so it
//! must be stable: the input is trimmed and, when it carries no `http://` or
//! `https://` scheme, `http://` is prepended. The rest of the string is kept
//! byte-for-byte; parsing is used for validation only.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL exceeds {MAX_LONG_URL_BYTES} bytes")]
    TooLong,
}

/// Upper bound on the stored URL in bytes, keeping `(long_url, owner)` well
/// inside the btree index row limit.
pub const MAX_LONG_URL_BYTES: usize = 2048;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Normalizes a user-supplied long URL.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for blank input,
/// [`UrlNormalizationError::UnsupportedProtocol`] for explicit non-HTTP schemes
/// and [`UrlNormalizationError::InvalidFormat`] / [`UrlNormalizationError::MissingHost`]
/// for anything that does not parse as an absolute HTTP(S) URL.
/// Returns [`UrlNormalizationError::TooLong`] when the normalized URL is longer
/// than [`MAX_LONG_URL_BYTES`] bytes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_long_url("example.com/page").unwrap(), "http://example.com/page");
/// assert_eq!(normalize_long_url("https://example.com").unwrap(), "https://example.com");
/// ```
pub fn normalize_long_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(UrlNormalizationError::InvalidFormat(
            "URL contains whitespace".to_string(),
        ));
    }

    let lowercase = trimmed.to_ascii_lowercase();
    let candidate = if lowercase.starts_with(HTTP_PREFIX) || lowercase.starts_with(HTTPS_PREFIX) {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("{HTTP_PREFIX}{trimmed}")
    };

    if candidate.len() > MAX_LONG_URL_BYTES {
        return Err(UrlNormalizationError::TooLong);
    }

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(candidate),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}
