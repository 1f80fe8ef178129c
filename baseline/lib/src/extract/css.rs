//! CSS selector and property extraction.
//!
//! The selector and property scans are independent passes over the same text.
//! Properties are keyed by name only and are never associated with the
//! selector whose block they appear in.

use super::{TokenKind, TokenSet};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// An identifier, optionally prefixed with `.` or `#`, directly before `{`.
static SELECTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([.#]?[a-zA-Z_-][a-zA-Z0-9_-]*)\s*\{").expect("Invalid CSS selector regex")
});

/// A bare identifier directly before `:`.
static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z-]+)\s*:").expect("Invalid CSS property regex"));

/// Selectors and property names found in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssElements {
    pub selectors: TokenSet,
    pub properties: TokenSet,
}

impl Default for CssElements {
    fn default() -> Self {
        Self {
            selectors: TokenSet::new(TokenKind::CssSelector),
            properties: TokenSet::new(TokenKind::CssProperty),
        }
    }
}

/// Extracts lower-cased selectors and property names.
///
/// Only the last compound of a selector list is seen, because only the
/// identifier touching `{` matches. Pseudo-classes such as `a:hover` surface
/// as a property named `a`.
///
/// ## Examples
///
/// ```
/// use baseline_lib::extract::extract_css_elements;
///
/// let css = extract_css_elements(".card { display: grid; gap: 1rem; }");
/// assert_eq!(css.selectors, [".card"]);
/// assert_eq!(css.properties, ["display", "gap"]);
/// ```
pub fn extract_css_elements(text: &str) -> CssElements {
    let mut elements = CssElements::default();

    for captures in SELECTOR_RE.captures_iter(text) {
        if let Some(selector) = captures.get(1) {
            elements.selectors.insert(selector.as_str());
        }
    }
    for captures in PROPERTY_RE.captures_iter(text) {
        if let Some(property) = captures.get(1) {
            elements.properties.insert(property.as_str());
        }
    }

    elements
}
