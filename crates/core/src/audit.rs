//! Main audit API.
//!
//! The [`Auditor`] runs the whole pipeline for one request: normalize the
//! URL, fetch the page with its auxiliary resources, extract signals, score
//! them and assemble an [`AuditReport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use seoscope_core::{AuditRequest, audit};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = AuditRequest::new("example.com").with_keyword("example");
//! let report = audit(&request).await?;
//! println!("{} ({})", report.breakdown.score, report.breakdown.verdict);
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use url::Url;

use crate::report::AuditReport;
use crate::scoring::score;
use crate::signals::{AuxiliaryResources, extract_signals_from_html};

/// Input of one audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuditRequest {
    /// Raw URL as typed by the user; a scheme is optional.
    pub url: String,
    /// Keyword to look for on the page.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl AuditRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), keyword: None }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Trimmed keyword, or `None` when absent or blank.
    pub fn trimmed_keyword(&self) -> Option<String> {
        trim_keyword(self.keyword.as_deref())
    }
}

fn trim_keyword(keyword: Option<&str>) -> Option<String> {
    keyword.map(str::trim).filter(|k| !k.is_empty()).map(str::to_string)
}

/// Builds the report for a page that has already been fetched.
///
/// `url` is the normalized URL that was requested and is echoed in the
/// report. `final_url` is where the page was served from after redirects and
/// decides the HTTPS signal. Every caller that fetches on its own goes
/// through here, so extraction, scoring and keyword handling stay in one place.
pub fn assemble_report(
    url: &Url, html: &str, final_url: &Url, aux: AuxiliaryResources, keyword: Option<&str>,
) -> AuditReport {
    let keyword = trim_keyword(keyword);
    let signals = extract_signals_from_html(html, final_url, aux);
    let breakdown = score(&signals, keyword.as_deref());

    AuditReport::new(url.to_string(), keyword, signals, breakdown)
}

/// Audits already fetched HTML without touching the network.
///
/// `final_url` is the page's post-redirect URL. It is echoed in the report
/// and decides the HTTPS signal.
///
/// # Example
///
/// ```rust
/// use seoscope_core::{AuxiliaryResources, audit_html};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// let report = audit_html("<title>Home</title>", &url, AuxiliaryResources::default(), None);
/// assert_eq!(report.breakdown.technical_score, 15);
/// ```
pub fn audit_html(html: &str, final_url: &Url, aux: AuxiliaryResources, keyword: Option<&str>) -> AuditReport {
    assemble_report(final_url, html, final_url, aux, keyword)
}

#[cfg(feature = "fetch")]
pub use self::online::{Auditor, audit};

#[cfg(feature = "fetch")]
mod online {
    use super::*;
    use crate::fetch::{FetchConfig, fetch_all};
    use crate::normalize::normalize_url;
    use crate::{AuditError, Result};

    /// Runs audits with a fixed fetch configuration.
    ///
    /// Holds no per-request state, so one instance can serve concurrent audits.
    #[derive(Debug, Clone, Default)]
    pub struct Auditor {
        config: FetchConfig,
    }

    impl Auditor {
        pub fn new(config: FetchConfig) -> Self {
            Self { config }
        }

        pub fn config(&self) -> &FetchConfig {
            &self.config
        }

        /// Audits the page named by `request`.
        ///
        /// # Errors
        ///
        /// [`AuditError::InvalidInput`] for an empty or unparseable URL,
        /// [`AuditError::FetchFailed`] when the page itself cannot be fetched.
        /// Unreachable `robots.txt` or `sitemap.xml` never fail the audit.
        pub async fn audit(&self, request: &AuditRequest) -> Result<AuditReport> {
            let url = normalize_url(&request.url)?;
            tracing::debug!(url = %url, "fetching page and auxiliary resources");

            let (page, aux) = fetch_all(&url, &self.config).await.map_err(|e| {
                tracing::warn!(url = %url, error = %e, "page fetch failed");
                AuditError::from(e)
            })?;

            let body = page.body.unwrap_or_default();
            tracing::debug!(
                final_url = %page.final_url,
                status = page.status,
                bytes = body.len(),
                robots = aux.has_robots,
                sitemap = aux.has_sitemap,
                "page fetched"
            );

            let report = assemble_report(&url, &body, &page.final_url, aux, request.keyword.as_deref());

            tracing::info!(
                url = %url,
                score = report.breakdown.score,
                verdict = %report.breakdown.verdict,
                "audit complete"
            );

            Ok(report)
        }
    }

    /// Audits a page with the default [`FetchConfig`].
    pub async fn audit(request: &AuditRequest) -> Result<AuditReport> {
        Auditor::default().audit(request).await
    }
}
