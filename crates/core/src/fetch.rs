//! Fetching the audited page and its auxiliary resources.
//!
//! A single audit issues three independent GET requests: the page itself,
//! `<origin>/robots.txt` and `<origin>/sitemap.xml`. Only the page can fail
//! the audit; the auxiliary checks collapse into booleans.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::FetchError;
pub use crate::signals::AuxiliaryResources;

/// HTTP client configuration for audit requests.
///
/// Controls the per-request timeout and the User-Agent header.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds, applied to each fetch separately.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (compatible; SeoscopeBot/0.1; single-page SEO audit)".to_string(),
        }
    }
}

/// Outcome of fetching one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// URL after following redirects.
    pub final_url: Url,
    /// HTTP status of the final response.
    pub status: u16,
    /// Response body, when it was read.
    pub body: Option<String>,
    /// Whether the final URL uses the `https` scheme.
    pub is_https: bool,
}

/// Builds the client shared by the three fetches of one audit.
///
/// Redirects follow reqwest's default policy (up to 10 hops).
pub fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))
}

fn map_reqwest_error(err: reqwest::Error, config: &FetchConfig) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout { timeout: config.timeout }
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// Fetches the primary page and reads its body.
///
/// # Errors
///
/// [`FetchError::Status`] for a non-2xx final response, [`FetchError::Timeout`]
/// when the timeout elapses, [`FetchError::Transport`] for anything else.
pub async fn fetch_page(client: &Client, url: &Url, config: &FetchConfig) -> Result<FetchResult, FetchError> {
    let response = client
        .get(url.clone())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| map_reqwest_error(e, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status: status.as_u16() });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|e| map_reqwest_error(e, config))?;

    Ok(FetchResult { is_https: final_url.scheme() == "https", status: status.as_u16(), body: Some(body), final_url })
}

/// Checks whether a resource answers with a 2xx status.
///
/// Failures are logged and reported as `false`; the body is never read.
pub async fn check_resource(client: &Client, url: &Url) -> bool {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let found = response.status().is_success();
            tracing::debug!(url = %url, status = response.status().as_u16(), found, "auxiliary resource checked");
            found
        }
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "auxiliary resource unreachable");
            false
        }
    }
}

/// Resolves a root-relative path such as `/robots.txt` against the URL's origin.
pub fn origin_resource(url: &Url, path: &str) -> Option<Url> {
    url.join(path).ok()
}

/// Fetches the page, robots.txt and sitemap.xml concurrently.
///
/// Auxiliary URLs are derived from the requested URL, not the post-redirect
/// one, since all three requests are in flight at once.
///
/// # Example
///
/// ```rust,no_run
/// use seoscope_core::{FetchConfig, fetch_all, normalize_url};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let url = normalize_url("example.com")?;
/// let (page, aux) = fetch_all(&url, &FetchConfig::default()).await?;
/// println!("{} robots={} sitemap={}", page.status, aux.has_robots, aux.has_sitemap);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_all(url: &Url, config: &FetchConfig) -> Result<(FetchResult, AuxiliaryResources), FetchError> {
    let client = build_client(config)?;

    let robots_url = origin_resource(url, "/robots.txt");
    let sitemap_url = origin_resource(url, "/sitemap.xml");

    let check = |target: Option<Url>| {
        let client = &client;
        async move {
            match target {
                Some(target) => check_resource(client, &target).await,
                None => false,
            }
        }
    };

    let (page, has_robots, has_sitemap) =
        tokio::join!(fetch_page(&client, url, config), check(robots_url), check(sitemap_url));

    Ok((page?, AuxiliaryResources { has_robots, has_sitemap }))
}
