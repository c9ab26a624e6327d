use std::time::Duration;

use owo_colors::OwoColorize;
use seoscope_core::{AuditReport, Verdict};

use crate::VERSION;

/// Banner shown before a verbose audit
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Seoscope".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Single-page SEO audit\n".dimmed());
}

/// `[n/total] message` progress line for the three audit stages.
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Warnings flag checks that lower the score without failing the audit.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Prints an elapsed time, flagged slow once it passes half the fetch timeout.
pub fn print_timing(label: &str, elapsed: Duration, timeout_secs: u64) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let slow_after = timeout_secs as f64 * 500.0;
    let label = format!("{}:", label);

    if ms < slow_after {
        eprintln!("  {} {:>8.2}ms", label.dimmed(), ms);
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Print the score and verdict, colored by verdict
pub fn print_score_summary(report: &AuditReport) {
    let b = &report.breakdown;
    let headline = format!("{}/100 {}", b.score, b.verdict);

    eprintln!("\n{}", "═".repeat(60).dimmed());
    match b.verdict {
        Verdict::Excellent => eprintln!("  {} {}", "Score:".dimmed(), headline.bold().green()),
        Verdict::NeedsImprovement => eprintln!("  {} {}", "Score:".dimmed(), headline.bold().yellow()),
        Verdict::Poor => eprintln!("  {} {}", "Score:".dimmed(), headline.bold().red()),
    }
    eprintln!(
        "  {} {}  {} {}",
        "Keyword:".dimmed(),
        format!("{}/80", b.keyword_score).bright_white(),
        "Technical:".dimmed(),
        format!("{}/35", b.technical_score).bright_white()
    );
    eprintln!("{}\n", "═".repeat(60).dimmed());
}

/// Page size in bytes or KiB.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 { format!("{} B", bytes) } else { format!("{:.1} KiB", bytes as f64 / 1024.0) }
}
