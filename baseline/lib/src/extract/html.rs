//! HTML tag name extraction.

use super::{TokenKind, TokenSet};
use regex::Regex;
use std::sync::LazyLock;

/// Opening or closing tag: `<name ...>` or `</name ...>`.
///
/// The name must start with an ASCII letter. Attributes and a self-closing
/// slash are consumed by `[^>]*` and otherwise ignored.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("Invalid HTML tag regex")
});

/// Extracts lower-cased tag names in first-occurrence order.
///
/// ## Examples
///
/// ```
/// use baseline_lib::extract::extract_html_tags;
///
/// let tags = extract_html_tags("<DIV><img src='a.png'/></div><p>");
/// assert_eq!(tags, ["div", "img", "p"]);
/// ```
pub fn extract_html_tags(text: &str) -> TokenSet {
    let mut tags = TokenSet::new(TokenKind::HtmlTag);
    for captures in TAG_RE.captures_iter(text) {
        if let Some(name) = captures.get(1) {
            tags.insert(name.as_str());
        }
    }
    tags
}
