//! Markdown rendering for hover popups.

use crate::analysis::{HoverReport, HoverSupport};
use crate::compat::{BaselineTier, CompatibilityRecord, ImplementationStatus};
use std::fmt::Write;

const SUPPORTED_ICON: &str = "✅";
const NOT_SUPPORTED_ICON: &str = "❌";
const FALLBACK_BROWSER_ICON: &str = "⚫";

/// Icon shown before a browser implementation line.
pub fn browser_icon(key: &str) -> &'static str {
    match key {
        "chrome" => "🔵",
        "chrome_android" => "📱",
        "firefox" | "firefox_android" => "🦊",
        "safari" | "safari_ios" => "🧭",
        "edge" => "🔷",
        _ => FALLBACK_BROWSER_ICON,
    }
}

/// Human-readable browser name; unknown keys are shown verbatim.
pub fn browser_name(key: &str) -> &str {
    match key {
        "chrome" => "Chrome",
        "chrome_android" => "Chrome Android",
        "firefox" => "Firefox",
        "firefox_android" => "Firefox Android",
        "safari" => "Safari",
        "safari_ios" => "Safari iOS",
        "edge" => "Edge",
        other => other,
    }
}

pub fn tier_icon(tier: BaselineTier) -> &'static str {
    match tier {
        BaselineTier::Widely => "🟢",
        BaselineTier::Newly => "🔵",
        BaselineTier::Limited => "🟡",
        BaselineTier::Unavailable | BaselineTier::Unknown => "🔴",
    }
}

/// Renders the browser-support block of a hover.
///
/// Lists every implementation the record carries, then the baseline status
/// and date when the service published one.
///
/// ## Examples
///
/// ```
/// use baseline_lib::display::render_support_markdown;
///
/// assert_eq!(render_support_markdown(None), "\n\n**Browser Support:** No data available");
/// ```
pub fn render_support_markdown(record: Option<&CompatibilityRecord>) -> String {
    let Some(record) = record else {
        return "\n\n**Browser Support:** No data available".to_string();
    };

    let mut markdown = String::from("\n\n**Browser Support:**\n\n");

    for (key, implementation) in record.browsers() {
        let status = if implementation.status == ImplementationStatus::Available {
            SUPPORTED_ICON
        } else {
            NOT_SUPPORTED_ICON
        };
        let version = implementation
            .version
            .as_deref()
            .map(|v| format!(" (v{v})"))
            .unwrap_or_default();

        let _ = write!(
            markdown,
            "{} **{}**: {}{}\n\n",
            browser_icon(key),
            browser_name(key),
            status,
            version
        );
    }

    if record.tier() != BaselineTier::Unknown {
        let _ = write!(
            markdown,
            "{} **Baseline Status:** {}\n\n",
            tier_icon(record.tier()),
            record.tier()
        );
        if let Some(since) = record.baseline_since() {
            let _ = write!(markdown, "📅 **Available Since:** {since}\n\n");
        }
    }

    markdown
}

/// Renders the complete hover text for a word.
pub fn render_hover_markdown(report: &HoverReport) -> String {
    let mut markdown = format!(
        "**Word:** `{}`\n\n**Line {}:** {}\n\n**Position:** Line {}, Column {}\n\n**Occurrences in file:** {}",
        report.word, report.line, report.line_text, report.line, report.column, report.occurrences
    );

    match &report.support {
        HoverSupport::NotQueried => {}
        HoverSupport::Resolved { record, .. } => {
            markdown.push_str(&render_support_markdown(record.as_ref()));
        }
        HoverSupport::Failed { .. } => {
            markdown.push_str("\n\n❌ **Error loading browser support data**");
        }
    }

    markdown
}
