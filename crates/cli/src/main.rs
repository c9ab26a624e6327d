use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use seoscope_core::{AuditError, FetchConfig, assemble_report, fetch_all, normalize_url};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Audit the on-page SEO of a single web page
#[derive(Parser, Debug)]
#[command(name = "seoscope")]
#[command(version)]
#[command(about = "Audit the on-page SEO of a single web page", long_about = None)]
struct Args {
    /// Page to audit; https:// is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Keyword to look for in title, description, H1 and opening text
    #[arg(short, long, value_name = "KEYWORD")]
    keyword: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds, per request
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let started = Instant::now();

    if args.verbose {
        echo::print_banner();
    }

    let url = normalize_url(&args.url).context("Failed to normalize URL")?;
    if args.verbose {
        echo::print_step(1, 3, &format!("Fetching {}", url.as_str().bright_white().underline()));
    }

    let defaults = FetchConfig::default();
    let config = FetchConfig { timeout: args.timeout, user_agent: args.user_agent.unwrap_or(defaults.user_agent) };

    let fetch_started = Instant::now();
    let (page, aux) = match fetch_all(&url, &config).await {
        Ok(fetched) => fetched,
        Err(e) => {
            if args.verbose {
                echo::print_error(&e.to_string());
            }
            return Err(anyhow::Error::new(AuditError::from(e)).context(format!("Failed to audit {}", url)));
        }
    };
    let body = page.body.unwrap_or_default();

    if args.verbose {
        eprintln!("  {} {}", "Status:".dimmed(), page.status.to_string().bright_white());
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(body.len()).bright_white());
        if page.final_url != url {
            echo::print_info(&format!("Redirected to {}", page.final_url));
        }
        if !aux.has_robots {
            echo::print_warning("robots.txt not found");
        }
        if !aux.has_sitemap {
            echo::print_warning("sitemap.xml not found");
        }
        echo::print_timing("Fetch", fetch_started.elapsed(), config.timeout);
        eprintln!();
        echo::print_step(2, 3, "Extracting signals and scoring");
    }

    let report = assemble_report(&url, &body, &page.final_url, aux, args.keyword.as_deref());

    let output = match args.format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report.to_json()).context("Failed to serialize report")? + "\n"
        }
    };

    if args.verbose {
        echo::print_score_summary(&report);
        echo::print_step(3, 3, &format!("Writing {:?} output", args.format));
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.verbose {
        echo::print_timing("Total", started.elapsed(), config.timeout);
    }

    Ok(())
}
