//! The two ways a front end consumes the engine.
//!
//! - [`analyze_document`]: full-file breakdown. Extracts every category,
//!   resolves the interesting tokens in one paced batch, and returns five
//!   categories with a display fragment per resolved token.
//! - [`hover_at`]: the word under a cursor, how often it occurs, and its
//!   compatibility data when the word is worth looking up.
//!
//! Both paths degrade instead of failing: lookup errors become "no data" in an
//! analysis and an error note in a hover.

use crate::classify::{HTML_TAGS, is_interesting_token};
use crate::compat::{CompatClient, CompatibilityRecord, ResolvedBatch};
use crate::display::{DisplayFragment, to_display_fragment};
use crate::document::DocumentKind;
use crate::extract::{ExtractedElements, TokenKind, TokenSet, extract_document};
use regex::Regex;
use serde::Serialize;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_$]+").expect("Invalid word regex"));

/// Stylesheet words keep their hyphens (`background-color`).
static STYLE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_$-]+").expect("Invalid stylesheet word regex"));

// ============================================================================
// Full-document analysis
// ============================================================================

/// Tokens of one category plus the fragments of those that were looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub tokens: TokenSet,
    /// Keyed by token text. Tokens that were not queried have no entry.
    pub support: BTreeMap<String, DisplayFragment>,
}

impl CategoryReport {
    fn build(tokens: TokenSet, batch: &ResolvedBatch) -> Self {
        let kind = tokens.kind();
        let support = tokens
            .iter()
            .filter(|token| is_queried(token, kind) && batch.contains(token))
            .map(|token| {
                (
                    token.to_string(),
                    to_display_fragment(token, batch.get(token), kind),
                )
            })
            .collect();
        Self { tokens, support }
    }

    pub fn fragment(&self, token: &str) -> Option<&DisplayFragment> {
        self.support.get(token)
    }
}

/// Full-file breakdown of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAnalysis {
    pub kind: DocumentKind,
    pub html_tags: CategoryReport,
    pub css_selectors: CategoryReport,
    pub css_properties: CategoryReport,
    pub js_functions: CategoryReport,
    pub js_variables: CategoryReport,
    /// Lookups that failed and were reported as no data.
    pub failed_lookups: usize,
}

impl DocumentAnalysis {
    /// Builds the report from extracted tokens and a finished batch.
    pub fn from_parts(kind: DocumentKind, elements: ExtractedElements, batch: &ResolvedBatch) -> Self {
        Self {
            kind,
            html_tags: CategoryReport::build(elements.html_tags, batch),
            css_selectors: CategoryReport::build(elements.css.selectors, batch),
            css_properties: CategoryReport::build(elements.css.properties, batch),
            js_functions: CategoryReport::build(elements.js.functions, batch),
            js_variables: CategoryReport::build(elements.js.variables, batch),
            failed_lookups: batch.failed_count(),
        }
    }

    /// The five categories with their headings, in display order.
    pub fn categories(&self) -> [(&'static str, &CategoryReport); 5] {
        [
            ("HTML Elements", &self.html_tags),
            ("CSS Selectors", &self.css_selectors),
            ("CSS Properties", &self.css_properties),
            ("JavaScript Functions", &self.js_functions),
            ("JavaScript Variables", &self.js_variables),
        ]
    }
}

/// Language a token category is classified in. CSS selectors are never
/// looked up.
fn lookup_language(kind: TokenKind) -> Option<DocumentKind> {
    match kind {
        TokenKind::HtmlTag => Some(DocumentKind::Html),
        TokenKind::CssProperty => Some(DocumentKind::Css),
        TokenKind::JsFunction | TokenKind::JsVariable => Some(DocumentKind::Javascript),
        TokenKind::CssSelector => None,
    }
}

/// Whether `token` of category `kind` is looked up during analysis.
fn is_queried(token: &str, kind: TokenKind) -> bool {
    lookup_language(kind).is_some_and(|language| is_interesting_token(token, language))
}

/// Tokens of `elements` that warrant a lookup, de-duplicated, in the order
/// HTML tags, CSS properties, JS functions, JS variables.
///
/// Each category is classified in the language it is written in, regardless
/// of the surrounding document. A category only receives fragments for its
/// own queried tokens, even when the same text was queried for another one.
pub fn tokens_to_query(elements: &ExtractedElements) -> Vec<String> {
    let groups = [
        &elements.html_tags,
        &elements.css.properties,
        &elements.js.functions,
        &elements.js.variables,
    ];

    let queries: IndexSet<&str> = groups
        .into_iter()
        .flat_map(|set| set.iter().filter(move |token| is_queried(token, set.kind())))
        .collect();
    queries.into_iter().map(str::to_string).collect()
}

/// Extracts, classifies and resolves every token of a document.
#[instrument(skip(text, client), fields(len = text.len()))]
pub async fn analyze_document(
    text: &str,
    kind: DocumentKind,
    client: &CompatClient,
) -> DocumentAnalysis {
    let elements = extract_document(text, kind);
    let queries = tokens_to_query(&elements);
    debug!(queries = queries.len(), "Resolving document tokens");

    let batch = client.resolve_many(&queries).await;
    DocumentAnalysis::from_parts(kind, elements, &batch)
}

/// Extraction only: the same report with no lookups performed.
pub fn analyze_document_offline(text: &str, kind: DocumentKind) -> DocumentAnalysis {
    DocumentAnalysis::from_parts(kind, extract_document(text, kind), &ResolvedBatch::default())
}

// ============================================================================
// Hover
// ============================================================================

/// A word located in a line, with byte offsets into that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// Finds the word touching the 0-based character `column` of `line`.
///
/// A cursor directly after the last character of a word still selects it.
/// Returns `None` when the cursor is on whitespace or punctuation, or past the
/// end of the line.
pub fn word_at(line: &str, column: usize, kind: DocumentKind) -> Option<WordSpan> {
    let offset = if column == line.chars().count() {
        line.len()
    } else {
        line.char_indices().nth(column)?.0
    };

    let pattern = if kind.is_stylesheet() {
        &STYLE_WORD_RE
    } else {
        &WORD_RE
    };

    pattern
        .find_iter(line)
        .find(|m| m.start() <= offset && offset <= m.end())
        .map(|m| WordSpan {
            word: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
}

/// Counts whole-word, case-insensitive occurrences of `word` in `text`.
pub fn count_occurrences(text: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .map(|re| re.find_iter(text).count())
        .unwrap_or(0)
}

/// Compatibility state of a hovered word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HoverSupport {
    /// The word is not a recognized web-platform construct for this document.
    NotQueried,
    /// The lookup succeeded; `record` is `None` when the service had no match.
    Resolved {
        record: Option<CompatibilityRecord>,
        fragment: DisplayFragment,
    },
    /// The lookup failed.
    Failed { error: String },
}

/// Everything shown when hovering a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverReport {
    pub word: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the cursor.
    pub column: usize,
    /// The hovered line, trimmed.
    pub line_text: String,
    pub occurrences: usize,
    pub support: HoverSupport,
}

fn hover_token_kind(word: &str, kind: DocumentKind) -> TokenKind {
    if kind.is_stylesheet() {
        TokenKind::CssProperty
    } else if kind == DocumentKind::Html
        || (kind.is_jsx() && HTML_TAGS.contains(&word.to_lowercase().as_str()))
    {
        TokenKind::HtmlTag
    } else {
        TokenKind::JsVariable
    }
}

/// Builds the hover report for the 0-based `line` and `column` of `text`.
///
/// Returns `None` when the position is not on a word.
#[instrument(skip(text, client))]
pub async fn hover_at(
    text: &str,
    kind: DocumentKind,
    line: usize,
    column: usize,
    client: &CompatClient,
) -> Option<HoverReport> {
    let line_text = text.lines().nth(line)?;
    let span = word_at(line_text, column, kind)?;
    let word = span.word;

    let support = if is_interesting_token(&word, kind) {
        match client.resolve_one(&word).await {
            Ok(record) => {
                let fragment =
                    to_display_fragment(&word, record.as_ref(), hover_token_kind(&word, kind));
                HoverSupport::Resolved { record, fragment }
            }
            Err(e) => {
                warn!(error = %e, "Hover lookup failed");
                HoverSupport::Failed {
                    error: e.to_string(),
                }
            }
        }
    } else {
        HoverSupport::NotQueried
    };

    Some(HoverReport {
        occurrences: count_occurrences(text, &word),
        word,
        line: line + 1,
        column: column + 1,
        line_text: line_text.trim().to_string(),
        support,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_to_query_for_html_scenario() {
        let elements = extract_document("<div class='x'></div>", DocumentKind::Html);
        assert_eq!(elements.html_tags, ["div"]);
        assert_eq!(tokens_to_query(&elements), vec!["div"]);
    }

    #[test]
    fn test_tokens_to_query_filters_and_merges() {
        let text = r#"<main><my-card></my-card></main>
<style>.x { color: red; --brand: blue; }</style>
<script>
const renderChart = () => {};
const fetch = window.fetch;
function setTimeout() {}
</script>"#;
        let elements = extract_document(text, DocumentKind::Html);

        assert_eq!(
            tokens_to_query(&elements),
            vec!["main", "style", "script", "color", "setTimeout", "fetch"]
        );
    }

    #[test]
    fn test_tokens_to_query_skips_selectors() {
        let elements = extract_document("div { }", DocumentKind::Css);
        assert_eq!(elements.css.selectors, ["div"]);
        assert!(tokens_to_query(&elements).is_empty());
    }

    #[test]
    fn test_only_classified_categories_are_queried() {
        assert!(is_queried("div", TokenKind::HtmlTag));
        assert!(!is_queried("div", TokenKind::CssSelector));
        assert!(is_queried("color", TokenKind::CssProperty));
        assert!(!is_queried("table", TokenKind::JsVariable));
        assert!(is_queried("fetch", TokenKind::JsVariable));
    }

    #[test]
    fn test_offline_analysis_has_tokens_but_no_fragments() {
        let analysis = analyze_document_offline(".a { margin: 0 }", DocumentKind::Css);
        assert_eq!(analysis.css_properties.tokens, ["margin"]);
        assert!(analysis.css_properties.support.is_empty());
        assert_eq!(analysis.failed_lookups, 0);
    }

    #[test]
    fn test_categories_order() {
        let analysis = analyze_document_offline("", DocumentKind::Other);
        let headings: Vec<&str> = analysis.categories().iter().map(|(h, _)| *h).collect();
        assert_eq!(
            headings,
            vec![
                "HTML Elements",
                "CSS Selectors",
                "CSS Properties",
                "JavaScript Functions",
                "JavaScript Variables"
            ]
        );
    }

    #[test]
    fn test_word_at_middle_and_edges() {
        let line = "  <div class='x'>";
        assert_eq!(word_at(line, 4, DocumentKind::Html).unwrap().word, "div");
        assert_eq!(word_at(line, 3, DocumentKind::Html).unwrap().word, "div");
        assert_eq!(word_at(line, 6, DocumentKind::Html).unwrap().word, "div");
        assert!(word_at(line, 0, DocumentKind::Html).is_none());
    }

    #[test]
    fn test_word_at_past_end_is_none() {
        assert!(word_at("div", 10, DocumentKind::Html).is_none());
        assert_eq!(word_at("div", 3, DocumentKind::Html).unwrap().word, "div");
    }

    #[test]
    fn test_word_at_keeps_hyphens_in_stylesheets() {
        let line = "  background-color: red;";
        assert_eq!(word_at(line, 5, DocumentKind::Css).unwrap().word, "background-color");
        assert_eq!(word_at(line, 5, DocumentKind::Javascript).unwrap().word, "background");
    }

    #[test]
    fn test_word_at_counts_characters_not_bytes() {
        let line = "é fetch";
        let span = word_at(line, 3, DocumentKind::Javascript).unwrap();
        assert_eq!(span.word, "fetch");
        assert_eq!(span.start, 3);
    }

    #[test]
    fn test_count_occurrences_whole_word_case_insensitive() {
        let text = "<div><DIV></div> divider div.";
        assert_eq!(count_occurrences(text, "div"), 4);
        assert_eq!(count_occurrences(text, "iv"), 0);
        assert_eq!(count_occurrences(text, ""), 0);
    }

    #[test]
    fn test_count_occurrences_escapes_regex() {
        assert_eq!(count_occurrences("a.b axb a.b", "a.b"), 2);
    }

    #[test]
    fn test_hover_token_kind() {
        assert_eq!(hover_token_kind("color", DocumentKind::Css), TokenKind::CssProperty);
        assert_eq!(hover_token_kind("div", DocumentKind::Html), TokenKind::HtmlTag);
        assert_eq!(hover_token_kind("div", DocumentKind::Typescriptreact), TokenKind::HtmlTag);
        assert_eq!(hover_token_kind("fetch", DocumentKind::Javascript), TokenKind::JsVariable);
    }
}
