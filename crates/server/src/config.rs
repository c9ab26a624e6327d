//! Server configuration, read from flags or `SEOSCOPE_*` environment variables.
//!
//! Mail credentials live only in [`NotifierConfig`] and are handed to the
//! notifier; the audit engine never sees them.

use clap::{Args, Parser};

/// Default transactional-email endpoint (Brevo v3).
pub const DEFAULT_MAIL_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// HTTP API for single-page SEO audits
#[derive(Parser, Debug, Clone)]
#[command(name = "seoscope-server")]
#[command(version)]
#[command(about = "HTTP API for single-page SEO audits", long_about = None)]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(short = 'H', long, env = "SEOSCOPE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "SEOSCOPE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Origins allowed by CORS (comma-separated); any origin when empty
    #[arg(long, env = "SEOSCOPE_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Per-request fetch timeout in seconds
    #[arg(long, env = "SEOSCOPE_FETCH_TIMEOUT", default_value_t = 10)]
    pub fetch_timeout: u64,

    #[command(flatten)]
    pub notifier: NotifierConfig,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Lead notification settings.
#[derive(Args, Debug, Clone, Default)]
pub struct NotifierConfig {
    /// Transactional-email API endpoint
    #[arg(long, env = "SEOSCOPE_MAIL_API_URL", default_value = DEFAULT_MAIL_API_URL)]
    pub mail_api_url: String,

    /// API key; leads are only logged when unset
    #[arg(long, env = "SEOSCOPE_MAIL_API_KEY", hide_env_values = true)]
    pub mail_api_key: Option<String>,

    /// Verified sender address
    #[arg(long, env = "SEOSCOPE_MAIL_SENDER")]
    pub mail_sender: Option<String>,

    /// Address that receives lead notifications
    #[arg(long, env = "SEOSCOPE_MAIL_RECIPIENT")]
    pub mail_recipient: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["seoscope-server"]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.fetch_timeout, 10);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.notifier.mail_api_url, DEFAULT_MAIL_API_URL);
    }

    #[test]
    fn test_origin_list() {
        let config = ServerConfig::try_parse_from([
            "seoscope-server",
            "--allowed-origins",
            "https://a.example,https://b.example",
            "--mail-api-key",
            "secret",
        ])
        .unwrap();
        assert_eq!(config.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.notifier.mail_api_key.as_deref(), Some("secret"));
    }
}
