use std::fmt;

use serde::Serialize;

use crate::signals::PageSignals;

/// Points for each location the keyword is found in.
pub const KEYWORD_LOCATION_POINTS: u32 = 20;

/// Points for each technical check that passes.
pub const TECHNICAL_CHECK_POINTS: u32 = 5;

/// Upper bound of the final score.
pub const MAX_SCORE: u32 = 100;

/// Lowest score rated [`Verdict::Excellent`].
pub const EXCELLENT_THRESHOLD: u32 = 80;

/// Lowest score rated [`Verdict::NeedsImprovement`].
pub const NEEDS_IMPROVEMENT_THRESHOLD: u32 = 50;

/// Where a keyword was found on the page.
///
/// Variants are declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum KeywordLocation {
    Title,
    MetaDescription,
    Heading,
    /// The first 200 characters of visible text.
    Content,
}

impl KeywordLocation {
    pub const ALL: [KeywordLocation; 4] = [Self::Title, Self::MetaDescription, Self::Heading, Self::Content];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::MetaDescription => "Meta Description",
            Self::Heading => "H1",
            Self::Content => "First 200 Characters",
        }
    }
}

/// Categorical summary of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Excellent,
    NeedsImprovement,
    Poor,
}

impl Verdict {
    /// Classifies a score: `>= 80` Excellent, `>= 50` Needs Improvement, else Poor.
    pub fn from_score(score: u32) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Verdict::Excellent
        } else if score >= NEEDS_IMPROVEMENT_THRESHOLD {
            Verdict::NeedsImprovement
        } else {
            Verdict::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::NeedsImprovement => "Needs Improvement",
            Verdict::Poor => "Poor",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// 0 to 80 in steps of 20.
    pub keyword_score: u32,
    /// 0 to 35 in steps of 5.
    pub technical_score: u32,
    /// Sum of both parts, clamped to 100.
    pub score: u32,
    pub verdict: Verdict,
    /// Locations the keyword matched, in [`KeywordLocation::ALL`] order.
    pub keyword_locations: Vec<KeywordLocation>,
}

/// Trims and lowercases a keyword, mapping blank input to `None`.
pub fn normalize_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Finds every location the keyword occurs in, case-insensitively.
///
/// A blank keyword matches nowhere.
pub fn keyword_locations(signals: &PageSignals, keyword: Option<&str>) -> Vec<KeywordLocation> {
    let Some(keyword) = normalize_keyword(keyword) else {
        return Vec::new();
    };

    KeywordLocation::ALL
        .into_iter()
        .filter(|location| match location {
            KeywordLocation::Title => signals.title.as_deref().is_some_and(|t| contains_ci(t, &keyword)),
            KeywordLocation::MetaDescription => signals
                .meta_description
                .as_deref()
                .is_some_and(|d| contains_ci(d, &keyword)),
            KeywordLocation::Heading => signals.headings.iter().any(|h| contains_ci(h, &keyword)),
            KeywordLocation::Content => contains_ci(&signals.content_preview, &keyword),
        })
        .collect()
}

/// Counts the technical checks a page passes.
///
/// Checks: title, meta description, HTTPS, viewport tag, sitemap, robots.txt
/// and alt text on every image. A page without images passes the alt check.
pub fn technical_checks_passed(signals: &PageSignals) -> u32 {
    [
        signals.title.is_some(),
        signals.meta_description.is_some(),
        signals.is_https,
        signals.has_viewport_tag,
        signals.has_sitemap,
        signals.has_robots,
        signals.all_images_have_alt(),
    ]
    .into_iter()
    .filter(|passed| *passed)
    .count() as u32
}

/// Scores a page from its signals and an optional keyword.
///
/// # Example
///
/// ```rust
/// use seoscope_core::{PageSignals, Verdict, score};
///
/// let signals = PageSignals { title: Some("Rust Widgets".into()), is_https: true, ..Default::default() };
/// let breakdown = score(&signals, Some("widgets"));
///
/// assert_eq!(breakdown.keyword_score, 20);
/// // title + https + zero images missing alt
/// assert_eq!(breakdown.technical_score, 15);
/// assert_eq!(breakdown.score, 35);
/// assert_eq!(breakdown.verdict, Verdict::Poor);
/// ```
pub fn score(signals: &PageSignals, keyword: Option<&str>) -> ScoreBreakdown {
    let keyword_locations = keyword_locations(signals, keyword);
    let keyword_score = keyword_locations.len() as u32 * KEYWORD_LOCATION_POINTS;
    let technical_score = technical_checks_passed(signals) * TECHNICAL_CHECK_POINTS;
    let score = (keyword_score + technical_score).min(MAX_SCORE);

    ScoreBreakdown { keyword_score, technical_score, score, verdict: Verdict::from_score(score), keyword_locations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn all_signals() -> PageSignals {
        PageSignals {
            title: Some("Best Coffee Beans".to_string()),
            meta_description: Some("Fresh coffee roasted daily.".to_string()),
            headings: vec!["Our Coffee".to_string()],
            word_count: 120,
            total_images: 2,
            images_missing_alt: 0,
            has_viewport_tag: true,
            has_robots: true,
            has_sitemap: true,
            is_https: true,
            content_preview: "Our Coffee is roasted in small batches.".to_string(),
        }
    }

    #[rstest]
    #[case(100, Verdict::Excellent)]
    #[case(80, Verdict::Excellent)]
    #[case(79, Verdict::NeedsImprovement)]
    #[case(50, Verdict::NeedsImprovement)]
    #[case(49, Verdict::Poor)]
    #[case(0, Verdict::Poor)]
    fn test_verdict_thresholds(#[case] score: u32, #[case] expected: Verdict) {
        assert_eq!(Verdict::from_score(score), expected);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::NeedsImprovement.to_string(), "Needs Improvement");
        assert_eq!(Verdict::Excellent.to_string(), "Excellent");
    }

    #[test]
    fn test_keyword_in_all_locations_is_clamped() {
        let breakdown = score(&all_signals(), Some("COFFEE"));

        assert_eq!(breakdown.keyword_score, 80);
        assert_eq!(breakdown.technical_score, 35);
        assert_eq!(breakdown.score, 100);
        assert_eq!(breakdown.verdict, Verdict::Excellent);
        assert_eq!(breakdown.keyword_locations, KeywordLocation::ALL.to_vec());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_blank_keyword_scores_zero(#[case] keyword: Option<&str>) {
        let breakdown = score(&all_signals(), keyword);
        assert_eq!(breakdown.keyword_score, 0);
        assert!(breakdown.keyword_locations.is_empty());
    }

    #[test]
    fn test_all_technical_no_keyword_no_images() {
        let signals = PageSignals { total_images: 0, images_missing_alt: 0, ..all_signals() };
        let breakdown = score(&signals, None);

        assert_eq!(breakdown.technical_score, 35);
        assert_eq!(breakdown.score, 35);
        assert_eq!(breakdown.verdict, Verdict::Poor);
    }

    #[test]
    fn test_missing_alt_loses_bonus() {
        let signals = PageSignals { total_images: 3, images_missing_alt: 1, ..all_signals() };
        assert_eq!(score(&signals, None).technical_score, 30);
    }

    #[test]
    fn test_empty_signals_score() {
        let breakdown = score(&PageSignals::default(), Some("anything"));

        assert_eq!(breakdown.keyword_score, 0);
        // Only the zero-image alt check passes.
        assert_eq!(breakdown.technical_score, 5);
        assert_eq!(breakdown.verdict, Verdict::Poor);
    }

    #[test]
    fn test_heading_hit_title_miss() {
        let signals = PageSignals {
            title: Some("Home".to_string()),
            headings: vec!["Intro".to_string(), "Welcome aboard".to_string()],
            ..Default::default()
        };
        assert_eq!(keyword_locations(&signals, Some("welcome")), vec![KeywordLocation::Heading]);
    }

    #[test]
    fn test_content_match_uses_preview_only() {
        let signals = PageSignals { content_preview: "short preview".to_string(), ..Default::default() };
        assert_eq!(keyword_locations(&signals, Some("Preview")), vec![KeywordLocation::Content]);
        assert!(keyword_locations(&signals, Some("later text")).is_empty());
    }

    #[test]
    fn test_score_is_bounded_for_all_flag_combinations() {
        for mask in 0u32..(1 << 7) {
            let bit = |n: u32| mask & (1 << n) != 0;
            let signals = PageSignals {
                title: bit(0).then(|| "kw title".to_string()),
                meta_description: bit(1).then(|| "kw desc".to_string()),
                is_https: bit(2),
                has_viewport_tag: bit(3),
                has_sitemap: bit(4),
                has_robots: bit(5),
                total_images: 1,
                images_missing_alt: if bit(6) { 0 } else { 1 },
                headings: vec!["kw".to_string()],
                content_preview: "kw".to_string(),
                ..Default::default()
            };
            let breakdown = score(&signals, Some("kw"));
            assert!(breakdown.score <= MAX_SCORE);
            assert_eq!(breakdown.technical_score, mask.count_ones() * TECHNICAL_CHECK_POINTS);
            assert_eq!(breakdown.keyword_score % KEYWORD_LOCATION_POINTS, 0);
        }
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword(Some("  Coffee Beans ")), Some("coffee beans".to_string()));
        assert_eq!(normalize_keyword(Some(" ")), None);
        assert_eq!(normalize_keyword(None), None);
    }
}
