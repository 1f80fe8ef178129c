//! Baseline - web-feature extraction and browser compatibility lookup
//!
//! Scans a document for HTML tags, CSS selectors and properties, and
//! JavaScript identifiers, then enriches the recognized ones with
//! cross-browser support data from the web-status feature service.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! analysis  → full-document analysis and hover lookups
//!   ↓
//! display   → display fragments and hover markdown
//!   ↓
//! compat    → feature-service client, records, match selection
//!   ↓
//! classify  → which tokens are worth a lookup
//!   ↓
//! extract   → regex scanners for HTML / CSS / JS tokens
//!   ↓
//! document  → document kinds
//! ```
//!
//! ## Examples
//!
//! ```rust,no_run
//! use baseline_lib::{analyze_document, CompatClient, CompatConfig, DocumentKind};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CompatClient::new(CompatConfig::from_env()?)?;
//! let analysis = analyze_document("<dialog open></dialog>", DocumentKind::Html, &client).await;
//!
//! for (heading, category) in analysis.categories() {
//!     println!("{heading}: {} found", category.tokens.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod classify;
pub mod compat;
pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod extract;

pub use analysis::{
    CategoryReport, DocumentAnalysis, HoverReport, HoverSupport, analyze_document,
    analyze_document_offline, count_occurrences, hover_at, tokens_to_query, word_at,
};
pub use classify::is_interesting_token;
pub use compat::{BaselineTier, CompatClient, CompatibilityRecord, ResolvedBatch};
pub use config::CompatConfig;
pub use display::{DisplayFragment, to_display_fragment};
pub use document::DocumentKind;
pub use error::{ConfigError, LookupError};
pub use extract::{Token, TokenKind, TokenSet, extract_document};
