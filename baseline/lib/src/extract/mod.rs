//! Pattern-based extraction of web-technology tokens from raw text.
//!
//! Extraction is regex-driven rather than a real parse. There is no tree or
//! scoping, and comments and string literals are not recognized.
//! Anything in the text that matches a pattern is reported, including matches
//! inside comments and strings.
//!
//! ## Module Structure
//!
//! - [`html`]: opening/closing tag names
//! - [`css`]: selectors and property names
//! - [`js`]: function and variable bindings
//!
//! ## Examples
//!
//! ```
//! use baseline_lib::extract::{extract_document, TokenKind};
//! use baseline_lib::DocumentKind;
//!
//! let elements = extract_document("<div class='x'></div>", DocumentKind::Html);
//! assert_eq!(elements.html_tags, ["div"]);
//! assert_eq!(elements.html_tags.kind(), TokenKind::HtmlTag);
//! ```

pub mod css;
pub mod html;
pub mod js;

pub use css::{CssElements, extract_css_elements};
pub use html::extract_html_tags;
pub use js::{JsElements, extract_js_elements};

use crate::document::DocumentKind;
use indexmap::IndexSet;
use indexmap::set::Slice;
use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, IntoStaticStr};

/// Structural category of an extracted token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    HtmlTag,
    CssSelector,
    CssProperty,
    JsFunction,
    JsVariable,
}

impl TokenKind {
    /// HTML and CSS tokens are case-insensitive and stored lower-cased.
    pub fn is_case_insensitive(self) -> bool {
        matches!(self, Self::HtmlTag | Self::CssSelector | Self::CssProperty)
    }

    /// Applies this kind's case rule to raw matched text.
    pub fn normalize(self, raw: &str) -> String {
        if self.is_case_insensitive() {
            raw.to_lowercase()
        } else {
            raw.to_string()
        }
    }
}

/// An extracted identifier together with its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Creates a token, normalizing `text` according to `kind`.
    pub fn new(kind: TokenKind, text: &str) -> Self {
        Self {
            kind,
            text: kind.normalize(text),
        }
    }
}

/// Ordered, de-duplicated tokens of a single kind.
///
/// Iteration follows first-insertion order. Serializes as a plain array of
/// strings.
#[derive(Debug, Clone)]
pub struct TokenSet {
    kind: TokenKind,
    values: IndexSet<String>,
}

impl TokenSet {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            values: IndexSet::new(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Normalizes and inserts `raw`. Returns `false` if it was already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        self.values.insert(self.kind.normalize(raw))
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.values.contains(self.kind.normalize(raw).as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &Slice<String> {
        self.values.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// The entries as [`Token`]s, in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.values.iter().map(|text| Token {
            kind: self.kind,
            text: text.clone(),
        })
    }
}

// Order matters: `IndexSet` equality alone ignores it.
impl PartialEq for TokenSet {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.values.as_slice() == other.values.as_slice()
    }
}

impl Eq for TokenSet {}

impl<const N: usize> PartialEq<[&str; N]> for TokenSet {
    fn eq(&self, other: &[&str; N]) -> bool {
        self.iter().eq(other.iter().copied())
    }
}

impl Serialize for TokenSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.values)
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Every category extracted from one document.
///
/// Categories whose scanner did not run for the document kind stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedElements {
    pub html_tags: TokenSet,
    pub css: CssElements,
    pub js: JsElements,
}

impl ExtractedElements {
    pub fn empty() -> Self {
        Self {
            html_tags: TokenSet::new(TokenKind::HtmlTag),
            css: CssElements::default(),
            js: JsElements::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html_tags.is_empty()
            && self.css.selectors.is_empty()
            && self.css.properties.is_empty()
            && self.js.functions.is_empty()
            && self.js.variables.is_empty()
    }
}

/// Runs the scanners appropriate for `kind` over `text`.
///
/// - HTML documents and unknown kinds run all three scanners.
/// - Stylesheets run only the CSS scanner.
/// - Scripts run the JS scanner; JSX kinds also run the HTML scanner, and
///   plain scripts do so when they appear to build markup in template
///   literals.
pub fn extract_document(text: &str, kind: DocumentKind) -> ExtractedElements {
    let mut elements = ExtractedElements::empty();

    let everything = matches!(kind, DocumentKind::Html | DocumentKind::Other);
    let scan_css = everything || kind.is_stylesheet();
    let scan_js = everything || kind.is_script();
    let scan_html =
        everything || kind.is_jsx() || (kind.is_script() && has_template_markup(text));

    if scan_html {
        elements.html_tags = extract_html_tags(text);
    }
    if scan_css {
        elements.css = extract_css_elements(text);
    }
    if scan_js {
        elements.js = extract_js_elements(text);
    }

    elements
}

fn has_template_markup(text: &str) -> bool {
    text.contains('`') && ["<div", "<span", "<p"].iter().any(|tag| text.contains(tag))
}
