//! Browser compatibility lookups against the web-status feature service.
//!
//! ## Module Structure
//!
//! - [`types`]: the immutable [`CompatibilityRecord`] and the response schema
//! - [`client`]: [`CompatClient`] with single and batch lookups, plus the
//!   candidate selection policy
//!
//! ## Examples
//!
//! ```rust,no_run
//! use baseline_lib::compat::CompatClient;
//! use baseline_lib::CompatConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CompatClient::new(CompatConfig::default())?;
//!
//! if let Some(record) = client.resolve_one("grid").await? {
//!     println!("{} is baseline {}", record.name(), record.tier());
//! }
//!
//! let batch = client.resolve_many(["div", "fetch"]).await;
//! assert_eq!(batch.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

pub use client::{CompatClient, ResolvedBatch, select_best_match};
pub use types::{
    BaselineTier, BrowserImplementation, CompatibilityRecord, FeatureEntry, FeatureQueryResponse,
    ImplementationStatus,
};
