//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types, a thin
//! wrapper over `scraper` that never fails on malformed markup. Accessors
//! return `None` or empty values when the element they look for is missing.
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title> Home </title></head>
//!         <body><h1>Welcome</h1><p>Hello there</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Home".to_string()));
//! assert_eq!(doc.select("h1").unwrap().len(), 1);
//! ```

use scraper::{ElementRef, Html, Node, Selector};

use crate::{AuditError, Result};

/// Elements whose text is never rendered to the reader.
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line of text when rendered. Inline elements
/// (`b`, `em`, `span`, `sub`, ...) join their text to the surrounding word.
const BLOCK_TEXT_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "td", "th", "tr", "ul",
];

/// Represents a parsed HTML document.
///
/// Parsing is infallible: `html5ever` recovers from any input, so partial or
/// broken pages produce a usable tree.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the raw HTML representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seoscope_core::parse::Document;
    ///
    /// let doc = Document::parse(r#"<img src="a.png"><img src="b.png" alt="B">"#);
    /// let images = doc.select("img").unwrap();
    /// assert_eq!(images.len(), 2);
    /// assert_eq!(images[1].attr("alt"), Some("B"));
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| AuditError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the trimmed text of the first `<title>` element.
    ///
    /// Returns `None` when there is no title or it is blank.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(non_blank)
    }

    /// Finds the first `<meta>` element whose `name` matches, ignoring ASCII case.
    pub fn meta_by_name(&'_ self, name: &str) -> Option<Element<'_>> {
        let selector = Selector::parse("meta[name]").ok()?;
        self.html
            .select(&selector)
            .find(|el| el.value().attr("name").is_some_and(|n| n.trim().eq_ignore_ascii_case(name)))
            .map(|element| Element { element })
    }

    /// Gets the trimmed `content` of `<meta name="{name}">`.
    ///
    /// Returns `None` when the tag or attribute is missing or blank.
    pub fn meta_content(&self, name: &str) -> Option<String> {
        self.meta_by_name(name)
            .and_then(|el| el.attr("content").map(str::to_string))
            .and_then(non_blank)
    }

    /// Gets the text a reader would see in the `<body>`.
    ///
    /// Skips `script`, `style`, `noscript` and `template` subtrees and
    /// collapses whitespace runs into single spaces. Text nodes are joined as
    /// they appear, so `Re<b>usable</b>` reads as one word; block elements
    /// such as `p`, `li` or `td` are separated.
    pub fn visible_text(&self) -> String {
        let root = Selector::parse("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
            .unwrap_or_else(|| self.html.root_element());

        let mut raw = String::new();
        collect_visible_text(root, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if HIDDEN_TEXT_TAGS.contains(&el.name()) => {}
            Node::Element(el) => {
                let block = BLOCK_TEXT_TAGS.contains(&el.name());
                if block {
                    out.push(' ');
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, out);
                }
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if it is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}
