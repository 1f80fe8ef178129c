//! JavaScript function and variable extraction.

use super::{TokenKind, TokenSet};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Three shapes, one capture group each:
/// 1. `function name`
/// 2. `name = function`
/// 3. `const name = (...) =>`
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:function\s+([a-zA-Z_$][a-zA-Z0-9_$]*)",
        r"|([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=\s*function",
        r"|const\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=\s*\([^)]*\)\s*=>)",
    ))
    .expect("Invalid JS function regex")
});

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:var|let|const)\s+([a-zA-Z_$][a-zA-Z0-9_$]*)")
        .expect("Invalid JS variable regex")
});

/// Function and variable names found in a script.
///
/// The two sets overlap: a `const` bound to an arrow function is reported in
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsElements {
    pub functions: TokenSet,
    pub variables: TokenSet,
}

impl Default for JsElements {
    fn default() -> Self {
        Self {
            functions: TokenSet::new(TokenKind::JsFunction),
            variables: TokenSet::new(TokenKind::JsVariable),
        }
    }
}

/// Extracts case-sensitive function and variable names.
///
/// ## Examples
///
/// ```
/// use baseline_lib::extract::extract_js_elements;
///
/// let js = extract_js_elements("const load = () => fetch(url);\nlet url = '/a';");
/// assert_eq!(js.functions, ["load"]);
/// assert_eq!(js.variables, ["load", "url"]);
/// ```
pub fn extract_js_elements(text: &str) -> JsElements {
    let mut elements = JsElements::default();

    for captures in FUNCTION_RE.captures_iter(text) {
        let name = (1..=3)
            .filter_map(|group| captures.get(group))
            .map(|m| m.as_str())
            .find(|name| !name.is_empty());
        if let Some(name) = name {
            elements.functions.insert(name);
        }
    }
    for captures in VARIABLE_RE.captures_iter(text) {
        if let Some(name) = captures.get(1) {
            elements.variables.insert(name.as_str());
        }
    }

    elements
}
