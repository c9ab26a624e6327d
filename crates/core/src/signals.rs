//! On-page SEO signal extraction.
//!
//! Turns a parsed [`Document`] into [`PageSignals`]. Every signal has an
//! "absent" default so incomplete pages still yield a full signal set.

use serde::Serialize;
use url::Url;

use crate::parse::Document;

/// Number of leading visible-text characters checked for the keyword.
pub const CONTENT_PREVIEW_CHARS: usize = 200;

/// Reachability of `robots.txt` and `sitemap.xml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuxiliaryResources {
    pub has_robots: bool,
    pub has_sitemap: bool,
}

/// Structured facts extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSignals {
    /// Trimmed text of the first `<title>`.
    pub title: Option<String>,
    /// Trimmed `content` of `<meta name="description">`.
    pub meta_description: Option<String>,
    /// Trimmed text of every `<h1>`, in document order.
    pub headings: Vec<String>,
    pub word_count: usize,
    pub total_images: usize,
    /// Images whose `alt` is absent or blank. Never exceeds `total_images`.
    pub images_missing_alt: usize,
    pub has_viewport_tag: bool,
    pub has_robots: bool,
    pub has_sitemap: bool,
    pub is_https: bool,
    /// First 200 characters of whitespace-normalized visible text.
    pub content_preview: String,
}

impl PageSignals {
    /// Returns `true` when every image carries alt text, including the zero-image case.
    pub fn all_images_have_alt(&self) -> bool {
        self.images_missing_alt == 0
    }

    pub fn first_heading(&self) -> Option<&str> {
        self.headings.first().map(String::as_str)
    }
}

/// Counts whitespace-separated tokens that contain at least one alphanumeric character.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

/// Extracts all signals from a parsed document.
///
/// `final_url` is the post-redirect URL of the page and decides `is_https`.
///
/// # Example
///
/// ```rust
/// use seoscope_core::{AuxiliaryResources, Document, extract_signals};
/// use url::Url;
///
/// let doc = Document::parse("<title>Home</title><h1>Welcome</h1><img src=a.png>");
/// let url = Url::parse("https://example.com/").unwrap();
/// let signals = extract_signals(&doc, &url, AuxiliaryResources::default());
///
/// assert_eq!(signals.title.as_deref(), Some("Home"));
/// assert_eq!(signals.headings, vec!["Welcome"]);
/// assert_eq!(signals.images_missing_alt, 1);
/// assert!(signals.is_https);
/// ```
pub fn extract_signals(doc: &Document, final_url: &Url, aux: AuxiliaryResources) -> PageSignals {
    let headings = doc
        .select("h1")
        .unwrap_or_default()
        .iter()
        .map(|h| h.text().trim().to_string())
        .collect();

    let images = doc.select("img").unwrap_or_default();
    let images_missing_alt = images
        .iter()
        .filter(|img| img.attr("alt").is_none_or(|alt| alt.trim().is_empty()))
        .count();

    let text = doc.visible_text();
    let content_preview = text.chars().take(CONTENT_PREVIEW_CHARS).collect();

    PageSignals {
        title: doc.title(),
        meta_description: doc.meta_content("description"),
        headings,
        word_count: count_words(&text),
        total_images: images.len(),
        images_missing_alt,
        has_viewport_tag: doc.meta_by_name("viewport").is_some(),
        has_robots: aux.has_robots,
        has_sitemap: aux.has_sitemap,
        is_https: final_url.scheme() == "https",
        content_preview,
    }
}

/// Parses `html` and extracts its signals.
pub fn extract_signals_from_html(html: &str, final_url: &Url, aux: AuxiliaryResources) -> PageSignals {
    extract_signals(&Document::parse(html), final_url, aux)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>  Rust Widgets | Example  </title>
            <meta name="description" content="Hand-made rust widgets.">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script>let ignored = "many many words here";</script>
        </head>
        <body>
            <h1> First heading </h1>
            <p>Some intro text, with 3 numbers &amp; symbols -- here.</p>
            <img src="a.png" alt="A widget">
            <img src="b.png" alt="   ">
            <img src="c.png">
            <h1>Second heading</h1>
            <style>.x { display: none; }</style>
        </body>
        </html>
    "#;

    fn https_url() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_extract_full_page() {
        let aux = AuxiliaryResources { has_robots: true, has_sitemap: false };
        let signals = extract_signals_from_html(FULL_PAGE, &https_url(), aux);

        assert_eq!(signals.title.as_deref(), Some("Rust Widgets | Example"));
        assert_eq!(signals.meta_description.as_deref(), Some("Hand-made rust widgets."));
        assert_eq!(signals.headings, vec!["First heading", "Second heading"]);
        assert_eq!(signals.first_heading(), Some("First heading"));
        assert_eq!(signals.total_images, 3);
        assert_eq!(signals.images_missing_alt, 2);
        assert!(signals.has_viewport_tag);
        assert!(signals.has_robots);
        assert!(!signals.has_sitemap);
        assert!(signals.is_https);
    }

    #[test]
    fn test_word_count_ignores_scripts_styles_and_symbols() {
        let signals = extract_signals_from_html(FULL_PAGE, &https_url(), AuxiliaryResources::default());
        // "First heading Some intro text, with 3 numbers & symbols -- here. Second heading"
        assert_eq!(signals.word_count, 12);
    }

    #[test]
    fn test_empty_page_degrades_to_defaults() {
        let url = Url::parse("http://example.com/").unwrap();
        let signals = extract_signals_from_html("", &url, AuxiliaryResources::default());

        assert_eq!(signals.title, None);
        assert_eq!(signals.meta_description, None);
        assert!(signals.headings.is_empty());
        assert_eq!(signals.word_count, 0);
        assert_eq!(signals.total_images, 0);
        assert_eq!(signals.images_missing_alt, 0);
        assert!(signals.all_images_have_alt());
        assert!(!signals.has_viewport_tag);
        assert!(!signals.is_https);
        assert!(signals.content_preview.is_empty());
    }

    #[test]
    fn test_content_preview_is_bounded() {
        let body = "word ".repeat(200);
        let html = format!("<body><p>{}</p></body>", body);
        let signals = extract_signals_from_html(&html, &https_url(), AuxiliaryResources::default());

        assert_eq!(signals.content_preview.chars().count(), CONTENT_PREVIEW_CHARS);
        assert_eq!(signals.word_count, 200);
    }

    #[test]
    fn test_empty_h1_is_kept_in_order() {
        let html = "<h1></h1><h1>  Real  </h1>";
        let signals = extract_signals_from_html(html, &https_url(), AuxiliaryResources::default());
        assert_eq!(signals.headings, vec!["", "Real"]);
    }

    #[test]
    fn test_images_missing_alt_never_exceeds_total() {
        let pages = [
            "",
            "<img>",
            "<img alt=''><img alt='x'>",
            "<img alt><img alt='  '><img alt='ok'><img>",
        ];
        for page in pages {
            let signals = extract_signals_from_html(page, &https_url(), AuxiliaryResources::default());
            assert!(signals.images_missing_alt <= signals.total_images, "page: {}", page);
        }
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let html = "<body><p>Re<b>usable</b> H<sub>2</sub>O e-<em>commerce</em></p></body>";
        let signals = extract_signals_from_html(html, &https_url(), AuxiliaryResources::default());

        assert_eq!(signals.content_preview, "Reusable H2O e-commerce");
        assert_eq!(signals.word_count, 3);
        assert_eq!(
            crate::scoring::keyword_locations(&signals, Some("reusable")),
            vec![crate::scoring::KeywordLocation::Content]
        );
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("- -- — !!"), 0);
        assert_eq!(count_words("a1 ... (b) über"), 3);
    }
}
