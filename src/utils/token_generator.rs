//! Short token generation.
//!
//! Tokens are drawn uniformly from the 62-character alphanumeric alphabet.
//! The generator gives no uniqueness guarantee: uniqueness is enforced by the
//! link store, and callers regenerate on collision.

use rand::Rng;

/// Alphabet used for short tokens: `A-Z`, `a-z`, `0-9`.
pub const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default number of characters in a short token.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Path segments served by fixed routes. A token equal to one of these
/// would be unreachable through `GET /{token}`.
const RESERVED_TOKENS: &[&str] = &["mylinks", "health", "stats"];

/// Generates a random short token of exactly `length` characters.
///
/// # Examples
///
/// ```ignore
/// let token = generate_token(8);
/// assert_eq!(token.len(), 8);
/// assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if the token collides with a fixed route segment.
pub fn is_reserved(token: &str) -> bool {
    RESERVED_TOKENS.contains(&token)
}

/// Returns true if `token` could have been produced by [`generate_token`].
///
/// Used to short-circuit lookups for tokens that cannot exist.
pub fn is_well_formed(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_charset_has_62_distinct_characters() {
        let unique: HashSet<_> = TOKEN_CHARSET.iter().collect();
        assert_eq!(TOKEN_CHARSET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_token_default_length() {
        let token = generate_token(DEFAULT_TOKEN_LENGTH);
        assert_eq!(token.len(), 8);
    }

    #[test]
    fn test_generate_token_respects_length() {
        for length in [1, 4, 12, 32] {
            assert_eq!(generate_token(length).len(), length);
        }
    }

    #[test]
    fn test_generate_token_zero_length() {
        assert!(generate_token(0).is_empty());
    }

    #[test]
    fn test_generate_token_alphanumeric_only() {
        for _ in 0..200 {
            let token = generate_token(16);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_token_produces_unique_tokens() {
        let tokens: HashSet<_> = (0..1000).map(|_| generate_token(8)).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_generate_token_uses_whole_alphabet() {
        let seen: HashSet<char> = (0..500).flat_map(|_| generate_token(32).chars().collect::<Vec<_>>()).collect();
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_reserved_tokens() {
        assert!(is_reserved("mylinks"));
        assert!(is_reserved("health"));
        assert!(!is_reserved("aB3dE9fG"));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("aB3dE9fG"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("ab-cd"));
        assert!(!is_well_formed("favicon.ico"));
    }
}
