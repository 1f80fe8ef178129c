//! Presentation descriptors built from compatibility records.
//!
//! Everything here is pure: no I/O, no network. [`to_display_fragment`] is the
//! structured form used by the analysis output; [`markdown`] renders the hover
//! text.

pub mod markdown;

pub use markdown::{render_hover_markdown, render_support_markdown};

use crate::compat::{BaselineTier, BrowserImplementation, CompatibilityRecord, ImplementationStatus};
use crate::extract::TokenKind;
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Core browsers shown for every feature, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
}

impl Browser {
    /// Implementation key used by the feature service.
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chrome => "Chrome",
            Self::Firefox => "Firefox",
            Self::Safari => "Safari",
            Self::Edge => "Edge",
        }
    }

    /// Keys tried in order: desktop first, then the mobile variants.
    pub fn lookup_keys(self) -> [String; 3] {
        let key = self.key();
        [key.to_string(), format!("{key}_android"), format!("{key}_ios")]
    }

    /// Finds this browser's implementation, falling back to a platform variant.
    pub fn find_in(self, record: &CompatibilityRecord) -> Option<(String, &BrowserImplementation)> {
        self.lookup_keys()
            .into_iter()
            .find_map(|key| record.browser(&key).map(|imp| (key, imp)))
    }
}

/// Display state of one browser for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SupportState {
    Supported,
    NotSupported,
    /// The service lists no implementation for this browser.
    Unknown,
}

/// One browser column of a display fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserCell {
    pub browser: Browser,
    /// Implementation key the data came from (`safari_ios` when the desktop
    /// key was missing); `None` for unknown cells.
    pub source_key: Option<String>,
    pub state: SupportState,
    pub version: Option<String>,
}

/// Compatibility summary of a resolved token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportSummary {
    pub feature_name: String,
    pub feature_id: String,
    pub tier: BaselineTier,
    /// Baseline date formatted as `YYYY-MM-DD`.
    pub available_since: Option<String>,
    pub spec_url: Option<String>,
    pub browsers: Vec<BrowserCell>,
}

/// Everything a presentation layer needs to show one token.
///
/// `support` is `None` when no record was found or the lookup failed; render
/// that as a neutral "no data" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFragment {
    pub token: String,
    pub kind: TokenKind,
    pub label: String,
    pub support: Option<SupportSummary>,
}

impl DisplayFragment {
    pub fn has_data(&self) -> bool {
        self.support.is_some()
    }
}

/// How a token is labelled: `<div>` for tags, `name()` for functions.
pub fn token_label(token: &str, kind: TokenKind) -> String {
    match kind {
        TokenKind::HtmlTag => format!("<{token}>"),
        TokenKind::JsFunction => format!("{token}()"),
        TokenKind::CssSelector | TokenKind::CssProperty | TokenKind::JsVariable => {
            token.to_string()
        }
    }
}

/// Builds the display descriptor for `token`.
///
/// ## Examples
///
/// ```
/// use baseline_lib::display::to_display_fragment;
/// use baseline_lib::extract::TokenKind;
///
/// let fragment = to_display_fragment("div", None, TokenKind::HtmlTag);
/// assert_eq!(fragment.label, "<div>");
/// assert!(!fragment.has_data());
/// ```
pub fn to_display_fragment(
    token: &str,
    record: Option<&CompatibilityRecord>,
    kind: TokenKind,
) -> DisplayFragment {
    DisplayFragment {
        token: token.to_string(),
        kind,
        label: token_label(token, kind),
        support: record.map(summarize),
    }
}

fn summarize(record: &CompatibilityRecord) -> SupportSummary {
    let browsers = Browser::iter()
        .map(|browser| match browser.find_in(record) {
            Some((key, implementation)) => BrowserCell {
                browser,
                source_key: Some(key),
                state: if implementation.status == ImplementationStatus::Available {
                    SupportState::Supported
                } else {
                    SupportState::NotSupported
                },
                version: implementation.version.clone(),
            },
            None => BrowserCell {
                browser,
                source_key: None,
                state: SupportState::Unknown,
                version: None,
            },
        })
        .collect();

    SupportSummary {
        feature_name: record.name().to_string(),
        feature_id: record.feature_id().to_string(),
        tier: record.tier(),
        available_since: record.baseline_since().map(|date| date.to_string()),
        spec_url: record.spec_url().map(str::to_string),
        browsers,
    }
}
