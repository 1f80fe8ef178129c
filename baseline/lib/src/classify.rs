//! Decides which tokens are worth a compatibility lookup.
//!
//! Only tokens found in the static tables below are queried; user-defined
//! identifiers never reach the network.

use crate::document::DocumentKind;

/// Standard HTML element names, matched case-insensitively.
pub static HTML_TAGS: &[&str] = &[
    "div", "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "img", "ul", "ol", "li", "table",
    "tr", "td", "th", "form", "input", "button", "textarea", "select", "option", "nav", "header",
    "footer", "main", "section", "article", "aside", "canvas", "video", "audio", "source",
    "iframe", "script", "style", "link", "meta", "title", "body", "html",
];

/// Common CSS property names, matched case-insensitively.
pub static CSS_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "font-size",
    "margin",
    "padding",
    "border",
    "width",
    "height",
    "display",
    "position",
    "float",
    "clear",
    "overflow",
    "z-index",
    "opacity",
    "visibility",
    "text-align",
    "text-decoration",
    "font-weight",
    "font-family",
    "line-height",
    "flex",
    "grid",
    "transform",
    "transition",
    "animation",
    "box-shadow",
    "border-radius",
    "cursor",
];

/// Well-known JavaScript globals and DOM methods, matched case-sensitively.
pub static JS_GLOBALS: &[&str] = &[
    "querySelector",
    "getElementById",
    "getElementsByClassName",
    "addEventListener",
    "fetch",
    "Promise",
    "Array",
    "Object",
    "String",
    "Number",
    "Boolean",
    "console",
    "setTimeout",
    "setInterval",
    "localStorage",
    "sessionStorage",
    "window",
    "document",
    "navigator",
    "location",
    "history",
    "XMLHttpRequest",
    "WebSocket",
    "Worker",
    "IntersectionObserver",
];

/// Returns `true` if `token` names a web-platform construct that should be
/// looked up for a document of the given kind.
///
/// ## Examples
///
/// ```
/// use baseline_lib::{is_interesting_token, DocumentKind};
///
/// assert!(is_interesting_token("div", DocumentKind::Html));
/// assert!(!is_interesting_token("div", DocumentKind::Javascript));
/// assert!(is_interesting_token("div", DocumentKind::Javascriptreact));
/// ```
pub fn is_interesting_token(token: &str, kind: DocumentKind) -> bool {
    let lower = token.to_lowercase();

    match kind {
        DocumentKind::Html => HTML_TAGS.contains(&lower.as_str()),
        DocumentKind::Css | DocumentKind::Scss | DocumentKind::Less => {
            CSS_PROPERTIES.contains(&lower.as_str())
        }
        DocumentKind::Javascript | DocumentKind::Typescript => JS_GLOBALS.contains(&token),
        DocumentKind::Javascriptreact | DocumentKind::Typescriptreact => {
            JS_GLOBALS.contains(&token) || HTML_TAGS.contains(&lower.as_str())
        }
        DocumentKind::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_tag_by_document_kind() {
        assert!(is_interesting_token("div", DocumentKind::Html));
        assert!(!is_interesting_token("div", DocumentKind::Javascript));
        assert!(is_interesting_token("div", DocumentKind::Javascriptreact));
        assert!(is_interesting_token("div", DocumentKind::Typescriptreact));
        assert!(!is_interesting_token("div", DocumentKind::Css));
    }

    #[test]
    fn test_html_and_css_are_case_insensitive() {
        assert!(is_interesting_token("DIV", DocumentKind::Html));
        assert!(is_interesting_token("Z-Index", DocumentKind::Less));
    }

    #[test]
    fn test_js_is_case_sensitive() {
        assert!(is_interesting_token("fetch", DocumentKind::Typescript));
        assert!(!is_interesting_token("Fetch", DocumentKind::Typescript));
        assert!(!is_interesting_token("promise", DocumentKind::Javascript));
    }

    #[test]
    fn test_css_properties_need_stylesheet() {
        assert!(is_interesting_token("grid", DocumentKind::Scss));
        assert!(!is_interesting_token("grid", DocumentKind::Html));
    }

    #[test]
    fn test_user_identifiers_are_ignored() {
        assert!(!is_interesting_token("renderChart", DocumentKind::Javascript));
        assert!(!is_interesting_token("my-widget", DocumentKind::Html));
    }

    #[test]
    fn test_other_documents_never_query() {
        assert!(!is_interesting_token("div", DocumentKind::Other));
        assert!(!is_interesting_token("fetch", DocumentKind::Other));
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(HTML_TAGS.len(), 43);
        assert_eq!(CSS_PROPERTIES.len(), 29);
        assert_eq!(JS_GLOBALS.len(), 25);
    }
}
