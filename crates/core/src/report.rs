//! Audit report and its external representations.
//!
//! [`AuditReport`] keeps the typed signals and scores. [`AuditReport::to_json`]
//! and [`AuditReport::to_text`] render them with the human-readable field
//! names clients expect, without adding any decisions of their own.

use serde::Serialize;

use crate::scoring::{KeywordLocation, ScoreBreakdown};
use crate::signals::PageSignals;

const MISSING: &str = "Missing";
const NOT_APPLICABLE: &str = "N/A";
const NOWHERE: &str = "None";

/// The complete result of auditing one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Normalized URL that was requested.
    pub url: String,
    /// Keyword as supplied, trimmed. `None` when blank.
    pub keyword: Option<String>,
    pub signals: PageSignals,
    pub breakdown: ScoreBreakdown,
}

/// Flat report shape sent to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFields {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title Tag")]
    pub title: String,
    #[serde(rename = "Meta Description")]
    pub meta_description: String,
    #[serde(rename = "H1 Count")]
    pub h1_count: usize,
    #[serde(rename = "First H1")]
    pub first_h1: String,
    #[serde(rename = "H1 Headings")]
    pub headings: Vec<String>,
    #[serde(rename = "Word Count")]
    pub word_count: usize,
    #[serde(rename = "Images")]
    pub total_images: usize,
    #[serde(rename = "Images Without ALT")]
    pub images_missing_alt: usize,
    #[serde(rename = "HTTPS Enabled")]
    pub https: &'static str,
    #[serde(rename = "robots.txt Found")]
    pub robots: &'static str,
    #[serde(rename = "Sitemap Found")]
    pub sitemap: &'static str,
    #[serde(rename = "Viewport (Mobile Friendly)")]
    pub viewport: &'static str,
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Keyword Found In")]
    pub keyword_found_in: String,
    #[serde(rename = "Keyword Score")]
    pub keyword_score: u32,
    #[serde(rename = "Technical Score")]
    pub technical_score: u32,
    #[serde(rename = "SEO Score (0–100)")]
    pub score: u32,
    #[serde(rename = "Verdict")]
    pub verdict: String,
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// Joins keyword locations with `", "`, in their fixed order.
pub fn format_locations(keyword: Option<&str>, locations: &[KeywordLocation]) -> String {
    match keyword {
        None => NOT_APPLICABLE.to_string(),
        Some(_) if locations.is_empty() => NOWHERE.to_string(),
        Some(_) => locations
            .iter()
            .map(KeywordLocation::label)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

impl AuditReport {
    pub fn new(url: String, keyword: Option<String>, signals: PageSignals, breakdown: ScoreBreakdown) -> Self {
        Self { url, keyword, signals, breakdown }
    }

    pub fn fields(&self) -> ReportFields {
        let s = &self.signals;
        let b = &self.breakdown;

        ReportFields {
            url: self.url.clone(),
            title: or_missing(s.title.as_deref()),
            meta_description: or_missing(s.meta_description.as_deref()),
            h1_count: s.headings.len(),
            first_h1: or_missing(s.first_heading()),
            headings: s.headings.clone(),
            word_count: s.word_count,
            total_images: s.total_images,
            images_missing_alt: s.images_missing_alt,
            https: yes_no(s.is_https),
            robots: yes_no(s.has_robots),
            sitemap: yes_no(s.has_sitemap),
            viewport: yes_no(s.has_viewport_tag),
            keyword: self.keyword.clone().unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            keyword_found_in: format_locations(self.keyword.as_deref(), &b.keyword_locations),
            keyword_score: b.keyword_score,
            technical_score: b.technical_score,
            score: b.score,
            verdict: b.verdict.to_string(),
        }
    }

    /// Renders the report as a JSON object with client-facing field names.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.fields()).expect("ReportFields has only string keys and plain values")
    }

    /// Renders the report as aligned `Label: value` lines.
    pub fn to_text(&self) -> String {
        let f = self.fields();
        let rows: Vec<(&str, String)> = vec![
            ("URL", f.url),
            ("Title Tag", f.title),
            ("Meta Description", f.meta_description),
            ("H1 Count", f.h1_count.to_string()),
            ("First H1", f.first_h1),
            ("Word Count", f.word_count.to_string()),
            ("Images", f.total_images.to_string()),
            ("Images Without ALT", f.images_missing_alt.to_string()),
            ("HTTPS Enabled", f.https.to_string()),
            ("robots.txt Found", f.robots.to_string()),
            ("Sitemap Found", f.sitemap.to_string()),
            ("Viewport (Mobile Friendly)", f.viewport.to_string()),
            ("Keyword", f.keyword),
            ("Keyword Found In", f.keyword_found_in),
            ("Keyword Score", format!("{}/80", f.keyword_score)),
            ("Technical Score", format!("{}/35", f.technical_score)),
            ("SEO Score (0–100)", f.score.to_string()),
            ("Verdict", f.verdict),
        ];

        let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        rows.into_iter()
            .map(|(label, value)| format!("{:<width$}  {}\n", format!("{}:", label), value, width = width + 1))
            .collect()
    }
}
