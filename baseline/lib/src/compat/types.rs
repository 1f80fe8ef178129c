//! Compatibility records and the feature-service response schema.
//!
//! The response structures mirror the JSON returned by the feature query
//! endpoint. Optional fields default when absent, but a field of the wrong
//! type or an unknown status value fails deserialization; callers surface
//! that as a parse failure instead of guessing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString, IntoStaticStr};

/// How broadly a feature is supported across the major browsers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BaselineTier {
    /// Supported by all core browsers for long enough to be considered safe.
    Widely,
    /// Recently became supported by all core browsers.
    Newly,
    /// Not yet supported by every core browser.
    Limited,
    Unavailable,
    /// The service published no baseline information.
    #[default]
    Unknown,
}

/// Whether a single browser ships a feature.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ImplementationStatus {
    Available,
    Unavailable,
    #[default]
    Unknown,
}

/// One browser's implementation of a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserImplementation {
    #[serde(default)]
    pub status: ImplementationStatus,
    /// Browser version that first shipped the feature.
    #[serde(default)]
    pub version: Option<String>,
    /// Release date of that version.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Canonical compatibility data for one web feature.
///
/// Built once from a service response and never modified afterwards; fields
/// are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityRecord {
    name: String,
    feature_id: String,
    tier: BaselineTier,
    baseline_since: Option<NaiveDate>,
    spec_url: Option<String>,
    browsers: BTreeMap<String, BrowserImplementation>,
}

impl CompatibilityRecord {
    /// Human-readable feature name (e.g. "Grid").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable feature identifier (e.g. "grid").
    pub fn feature_id(&self) -> &str {
        &self.feature_id
    }

    pub fn tier(&self) -> BaselineTier {
        self.tier
    }

    /// Date the feature reached its baseline tier, if it has one.
    pub fn baseline_since(&self) -> Option<NaiveDate> {
        self.baseline_since
    }

    pub fn spec_url(&self) -> Option<&str> {
        self.spec_url.as_deref()
    }

    /// Implementation keyed by browser identifier (`chrome`, `safari_ios`, ...).
    pub fn browsers(&self) -> &BTreeMap<String, BrowserImplementation> {
        &self.browsers
    }

    pub fn browser(&self, key: &str) -> Option<&BrowserImplementation> {
        self.browsers.get(key)
    }

    /// Returns `true` if `token` appears, ignoring case, in the name or the
    /// feature identifier.
    pub fn mentions(&self, token: &str) -> bool {
        let needle = token.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.feature_id.to_lowercase().contains(&needle)
    }
}

impl From<FeatureEntry> for CompatibilityRecord {
    fn from(entry: FeatureEntry) -> Self {
        let (tier, baseline_since) = match entry.baseline {
            Some(baseline) => (baseline.status, baseline.low_date),
            None => (BaselineTier::Unknown, None),
        };

        Self {
            name: entry.name,
            feature_id: entry.feature_id,
            tier,
            baseline_since,
            spec_url: entry.spec.and_then(SpecReference::into_url),
            browsers: entry.browser_implementations,
        }
    }
}

// ============================================================================
// Response Structures
// ============================================================================

/// Response body of the feature query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureQueryResponse {
    /// Candidate features; absent or empty means no match.
    #[serde(default)]
    pub data: Vec<FeatureEntry>,
}

/// A single candidate feature in a query response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureEntry {
    pub name: String,
    pub feature_id: String,
    #[serde(default)]
    pub baseline: Option<BaselineEntry>,
    #[serde(default)]
    pub browser_implementations: BTreeMap<String, BrowserImplementation>,
    #[serde(default)]
    pub spec: Option<SpecReference>,
}

/// Baseline classification of a feature.
#[derive(Debug, Clone, Deserialize)]
pub struct BaselineEntry {
    pub status: BaselineTier,
    /// Date the feature became newly available.
    #[serde(default)]
    pub low_date: Option<NaiveDate>,
    /// Date the feature became widely available.
    #[serde(default)]
    pub high_date: Option<NaiveDate>,
}

/// Specification reference, either a bare URL or a list of links.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SpecReference {
    Url(String),
    Links {
        #[serde(default)]
        links: Vec<SpecLink>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecLink {
    pub link: String,
}

impl SpecReference {
    /// The first usable URL, if any.
    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Url(url) => Some(url).filter(|u| !u.is_empty()),
            Self::Links { links } => links.into_iter().map(|l| l.link).find(|l| !l.is_empty()),
        }
    }
}
