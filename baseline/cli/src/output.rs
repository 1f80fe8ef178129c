//! Terminal and JSON rendering for the CLI.
//!
//! Terminal output colors each token by its baseline tier:
//! - **GREEN**: widely available
//! - **BLUE**: newly available
//! - **YELLOW**: limited availability
//! - **RED**: unavailable
//! - **DIMMED**: not looked up, or no data

use baseline_lib::display::{SupportState, SupportSummary};
use baseline_lib::{BaselineTier, CategoryReport, DocumentAnalysis, HoverReport};
use owo_colors::OwoColorize;
use std::fmt::Write;

pub fn format_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn tier_badge(tier: BaselineTier) -> String {
    let text = format!("[{tier}]");
    match tier {
        BaselineTier::Widely => text.green().to_string(),
        BaselineTier::Newly => text.blue().to_string(),
        BaselineTier::Limited => text.yellow().to_string(),
        BaselineTier::Unavailable => text.red().to_string(),
        BaselineTier::Unknown => text.dimmed().to_string(),
    }
}

fn browser_cells(support: &SupportSummary) -> String {
    support
        .browsers
        .iter()
        .map(|cell| {
            let mark = match cell.state {
                SupportState::Supported => "✓".green().to_string(),
                SupportState::NotSupported => "✗".red().to_string(),
                SupportState::Unknown => "?".dimmed().to_string(),
            };
            match &cell.version {
                Some(version) => format!("{} {mark} {version}", cell.browser.display_name()),
                None => format!("{} {mark}", cell.browser.display_name()),
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn format_category(out: &mut String, heading: &str, category: &CategoryReport) {
    let _ = writeln!(
        out,
        "{} {}",
        heading.bold(),
        format!("({})", category.tokens.len()).dimmed()
    );

    if category.tokens.is_empty() {
        let _ = writeln!(out, "  {}", "none found".dimmed());
        return;
    }

    for token in &category.tokens {
        match category.fragment(token) {
            Some(fragment) => match &fragment.support {
                Some(support) => {
                    let _ = writeln!(
                        out,
                        "  - {} {} {}",
                        fragment.label.bold(),
                        tier_badge(support.tier),
                        support.feature_name.dimmed()
                    );
                    let _ = writeln!(out, "      {}", browser_cells(support));
                    if let Some(since) = &support.available_since {
                        let _ = writeln!(out, "      {} {since}", "since".dimmed());
                    }
                }
                None => {
                    let _ = writeln!(out, "  - {} {}", fragment.label, "no data".dimmed());
                }
            },
            None => {
                let _ = writeln!(out, "  - {}", token.dimmed());
            }
        }
    }
}

/// Formats a document analysis for the terminal.
pub fn format_analysis(analysis: &DocumentAnalysis) -> String {
    let mut out = String::new();

    for (heading, category) in analysis.categories() {
        format_category(&mut out, heading, category);
        out.push('\n');
    }

    if analysis.failed_lookups > 0 {
        let _ = writeln!(
            out,
            "{}",
            format!("{} lookup(s) failed and are shown without data", analysis.failed_lookups)
                .yellow()
        );
    }

    out
}

/// Formats a hover report as its markdown text.
pub fn format_hover(report: &HoverReport) -> String {
    baseline_lib::display::render_hover_markdown(report)
}
