//! Owner token cookie handling.
//!
//! The owner token is an opaque UUID issued on a client's first shorten
//! request. It is not authenticated and only partitions "my links" queries.

use axum::http::{HeaderMap, HeaderValue, header};

/// Default cookie carrying the owner token.
pub const DEFAULT_OWNER_COOKIE: &str = "shortenAppToken";

/// One year.
const COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// Reads a cookie value from all `Cookie` headers of a request.
///
/// Surrounding quotes are stripped. Blank values, quoted or not, are treated
/// as absent.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Generates a fresh owner token.
pub fn new_owner_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Builds the `Set-Cookie` header value issuing `token`.
pub fn owner_cookie_header(name: &str, token: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}={token}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax; HttpOnly"
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(cookies: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_static(cookie));
        }
        headers
    }

    #[test]
    fn test_read_cookie_single() {
        let headers = headers_with(&["shortenAppToken=abc"]);
        assert_eq!(
            read_cookie(&headers, DEFAULT_OWNER_COOKIE),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_read_cookie_among_others() {
        let headers = headers_with(&["theme=dark; shortenAppToken=owner-1; lang=en"]);
        assert_eq!(
            read_cookie(&headers, DEFAULT_OWNER_COOKIE),
            Some("owner-1".to_string())
        );
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let headers = headers_with(&["theme=dark", "shortenAppToken=owner-2"]);
        assert_eq!(
            read_cookie(&headers, DEFAULT_OWNER_COOKIE),
            Some("owner-2".to_string())
        );
    }

    #[test]
    fn test_read_cookie_missing_or_empty() {
        assert!(read_cookie(&HeaderMap::new(), DEFAULT_OWNER_COOKIE).is_none());
        let headers = headers_with(&["shortenAppToken="]);
        assert!(read_cookie(&headers, DEFAULT_OWNER_COOKIE).is_none());
    }

    #[test]
    fn test_read_cookie_quoted_empty_is_absent() {
        let headers = headers_with(&["shortenAppToken=\"\""]);
        assert!(read_cookie(&headers, DEFAULT_OWNER_COOKIE).is_none());
    }

    #[test]
    fn test_read_cookie_quoted_blank_is_absent() {
        let headers = headers_with(&["shortenAppToken=\" \""]);
        assert!(read_cookie(&headers, DEFAULT_OWNER_COOKIE).is_none());
    }

    #[test]
    fn test_read_cookie_strips_quotes() {
        let headers = headers_with(&["shortenAppToken=\"owner-3\""]);
        assert_eq!(
            read_cookie(&headers, DEFAULT_OWNER_COOKIE),
            Some("owner-3".to_string())
        );
    }

    #[test]
    fn test_read_cookie_skips_empty_duplicate() {
        let headers = headers_with(&["shortenAppToken=\"\"", "shortenAppToken=owner-4"]);
        assert_eq!(
            read_cookie(&headers, DEFAULT_OWNER_COOKIE),
            Some("owner-4".to_string())
        );
    }

    #[test]
    fn test_read_cookie_does_not_match_prefix() {
        let headers = headers_with(&["shortenAppTokenX=nope"]);
        assert!(read_cookie(&headers, DEFAULT_OWNER_COOKIE).is_none());
    }

    #[test]
    fn test_new_owner_tokens_are_distinct() {
        assert_ne!(new_owner_token(), new_owner_token());
    }

    #[test]
    fn test_owner_cookie_header() {
        let value = owner_cookie_header(DEFAULT_OWNER_COOKIE, "abc").unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("shortenAppToken=abc;"));
        assert!(value.contains("Path=/"));
    }
}
