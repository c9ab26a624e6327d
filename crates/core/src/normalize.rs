//! URL normalization.
//!
//! Coerces user input such as `example.com/page` into an absolute,
//! fetchable URL.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{AuditError, Result};

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("scheme pattern is valid"));

/// Scheme prepended to input that carries none.
pub const DEFAULT_SCHEME: &str = "https";

/// Returns `true` if `input` starts with an explicit `scheme://` prefix.
pub fn has_scheme(input: &str) -> bool {
    SCHEME_RE.is_match(input)
}

/// Normalizes raw user input into an absolute HTTP(S) URL.
///
/// Trims whitespace and prefixes `https://` when no scheme is present.
/// Normalizing an already normalized URL returns it unchanged.
///
/// # Errors
///
/// Returns [`AuditError::InvalidInput`] when the input is empty, cannot be
/// parsed, has no host, or uses a scheme other than `http`/`https`.
///
/// # Example
///
/// ```rust
/// use seoscope_core::normalize_url;
///
/// let url = normalize_url("  example.com/about ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AuditError::InvalidInput("URL is empty".to_string()));
    }

    let candidate =
        if has_scheme(trimmed) { trimmed.to_string() } else { format!("{}://{}", DEFAULT_SCHEME, trimmed) };

    let url = Url::parse(&candidate).map_err(|e| AuditError::InvalidInput(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AuditError::InvalidInput(format!(
                "unsupported scheme '{}' (expected http or https)",
                other
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AuditError::InvalidInput(format!("{}: URL has no host", trimmed)));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("example.com", "https://example.com/")]
    #[case("  example.com/path?q=1  ", "https://example.com/path?q=1")]
    #[case("http://example.com", "http://example.com/")]
    #[case("HTTPS://Example.com/A", "https://example.com/A")]
    #[case("sub.example.co.uk:8080/x", "https://sub.example.co.uk:8080/x")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_url(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("ftp://example.com")]
    #[case("https://")]
    #[case("exa mple.com")]
    fn test_normalize_rejects(#[case] input: &str) {
        assert!(matches!(normalize_url(input), Err(AuditError::InvalidInput(_))));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["example.com", "http://example.com/a/b", "www.example.org/?x=y#frag"] {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_prefix_added_exactly_once() {
        let url = normalize_url("example.com").unwrap();
        assert_eq!(url.as_str().matches("https://").count(), 1);
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("git+ssh://host"));
        assert!(!has_scheme("example.com"));
        assert!(!has_scheme("example.com:8080"));
    }
}
