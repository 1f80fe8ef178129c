//! Document kinds as reported by an editor, or inferred from a file name.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The content type of the scanned document.
///
/// Variants serialize to the editor language identifiers (`"html"`,
/// `"javascriptreact"`, ...). Unrecognized identifiers parse to
/// [`DocumentKind::Other`] through [`DocumentKind::from_language_id`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Html,
    Css,
    Scss,
    Less,
    Javascript,
    Typescript,
    Javascriptreact,
    Typescriptreact,
    Other,
}

impl DocumentKind {
    /// Maps an editor language identifier to a kind, falling back to `Other`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use baseline_lib::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_language_id("typescriptreact"), DocumentKind::Typescriptreact);
    /// assert_eq!(DocumentKind::from_language_id("markdown"), DocumentKind::Other);
    /// ```
    pub fn from_language_id(language_id: &str) -> Self {
        language_id.trim().parse().unwrap_or(Self::Other)
    }

    /// Infers the kind from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("html" | "htm") => Self::Html,
            Some("css") => Self::Css,
            Some("scss") => Self::Scss,
            Some("less") => Self::Less,
            Some("js" | "mjs" | "cjs") => Self::Javascript,
            Some("ts" | "mts" | "cts") => Self::Typescript,
            Some("jsx") => Self::Javascriptreact,
            Some("tsx") => Self::Typescriptreact,
            _ => Self::Other,
        }
    }

    /// CSS and its preprocessor dialects.
    pub fn is_stylesheet(self) -> bool {
        matches!(self, Self::Css | Self::Scss | Self::Less)
    }

    /// JavaScript, TypeScript and their JSX variants.
    pub fn is_script(self) -> bool {
        matches!(
            self,
            Self::Javascript | Self::Typescript | Self::Javascriptreact | Self::Typescriptreact
        )
    }

    /// Script kinds that embed HTML tags through JSX.
    pub fn is_jsx(self) -> bool {
        matches!(self, Self::Javascriptreact | Self::Typescriptreact)
    }
}
