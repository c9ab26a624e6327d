//! Error types for audit operations.
//!
//! This module defines [`AuditError`], the error returned by the audit
//! pipeline, and [`FetchError`], the failure of a single HTTP fetch.
//!
//! Only two things can fail an audit: bad input and a failed primary page
//! fetch. Missing tags and unreachable `robots.txt`/`sitemap.xml` are never
//! errors; they degrade into absent or `false` signals.
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::{AuditError, Result, normalize_url};
//!
//! fn check(input: &str) -> Result<String> {
//!     let url = normalize_url(input)?;
//!     Ok(url.to_string())
//! }
//!
//! assert!(matches!(check("   "), Err(AuditError::InvalidInput(_))));
//! ```

use thiserror::Error;

/// Failure of a single HTTP fetch.
///
/// Returned by the page fetcher for the primary page. Auxiliary resources
/// collapse this into a boolean instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Connection, DNS, TLS, redirect or body decoding failure.
    #[error("{0}")]
    Transport(String),
}

/// Main error type for audit operations.
///
/// # Example
///
/// ```rust
/// use seoscope_core::{AuditError, FetchError};
///
/// let err = AuditError::FetchFailed(FetchError::Status { status: 404 });
/// assert_eq!(err.to_string(), "Failed to fetch page: HTTP status 404");
/// ```
#[derive(Error, Debug)]
pub enum AuditError {
    /// Empty or unparseable URL.
    ///
    /// Surfaced verbatim to the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The primary page could not be fetched.
    ///
    /// Carries the status code or the transport error text. No partial
    /// report is produced.
    #[error("Failed to fetch page: {0}")]
    FetchFailed(#[from] FetchError),

    /// Invalid CSS selector passed to [`crate::Document::select`].
    ///
    /// Page markup never produces this; malformed HTML is parsed leniently.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),
}

impl AuditError {
    /// Returns `true` when the error came from caller input rather than the network.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AuditError::InvalidInput(_))
    }
}

/// Result type alias for AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;
