//! Feature-service client.
//!
//! [`CompatClient::resolve_one`] serves hover lookups and reports failures to
//! the caller. [`CompatClient::resolve_many`] serves whole-document analysis:
//! it walks tokens strictly in order, sleeps for the configured pacing delay
//! between requests, and turns each failure into a `None` entry so the rest of
//! the batch still runs.

use super::types::{CompatibilityRecord, FeatureQueryResponse};
use crate::config::CompatConfig;
use crate::error::{ConfigError, LookupError};
use indexmap::IndexMap;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Picks the candidate that best matches `token`.
///
/// The first record whose name or feature identifier contains `token`
/// (ignoring case) wins; otherwise the first record; `None` when empty.
///
/// ## Examples
///
/// ```
/// use baseline_lib::compat::select_best_match;
/// # use baseline_lib::compat::{CompatibilityRecord, FeatureQueryResponse};
/// # let response: FeatureQueryResponse = serde_json::from_str(r#"{"data": [
/// #     {"name": "Subgrid", "feature_id": "subgrid"},
/// #     {"name": "Flexbox", "feature_id": "flexbox"}
/// # ]}"#).unwrap();
/// # let candidates: Vec<CompatibilityRecord> = response.data.into_iter().map(Into::into).collect();
/// let best = select_best_match("flex", candidates).unwrap();
/// assert_eq!(best.name(), "Flexbox");
/// ```
pub fn select_best_match(
    token: &str,
    candidates: Vec<CompatibilityRecord>,
) -> Option<CompatibilityRecord> {
    let position = candidates
        .iter()
        .position(|record| record.mentions(token))
        .unwrap_or(0);
    candidates.into_iter().nth(position)
}

/// Result of a batch lookup: exactly one entry per distinct input token, in
/// input order. Serializes as a `token -> record` map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedBatch {
    #[serde(flatten)]
    entries: IndexMap<String, Option<CompatibilityRecord>>,
    #[serde(skip)]
    failed: usize,
}

impl ResolvedBatch {
    fn push(&mut self, token: String, record: Option<CompatibilityRecord>) {
        self.entries.insert(token, record);
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// The record resolved for `token`, or `None` when the token had no match,
    /// failed, or was not part of the batch.
    pub fn get(&self, token: &str) -> Option<&CompatibilityRecord> {
        self.entries.get(token).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tokens whose lookup failed (as opposed to finding no match).
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&CompatibilityRecord>)> {
        self.entries
            .iter()
            .map(|(token, record)| (token.as_str(), record.as_ref()))
    }
}

/// Client for the feature query endpoint.
#[derive(Debug, Clone)]
pub struct CompatClient {
    http: HttpClient,
    config: CompatConfig,
}

impl CompatClient {
    /// Creates a client with its own HTTP connection pool.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::HttpClient` if the HTTP client cannot be built.
    pub fn new(config: CompatConfig) -> Result<Self, ConfigError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    /// Creates a client that shares an existing HTTP client.
    ///
    /// The configured request timeout is still applied per request.
    pub fn with_http_client(http: HttpClient, config: CompatConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &CompatConfig {
        &self.config
    }

    /// Fetches every candidate record the service returns for `token`.
    ///
    /// ## Errors
    ///
    /// - `LookupError::Transport`: the request or body read failed
    /// - `LookupError::RateLimited`: HTTP 429 after all configured retries
    /// - `LookupError::Status`: any other non-success status
    /// - `LookupError::Parse`: invalid JSON or a schema mismatch
    pub async fn query(&self, token: &str) -> Result<Vec<CompatibilityRecord>, LookupError> {
        let body = self.fetch_body(token).await?;

        let response: FeatureQueryResponse =
            serde_json::from_str(&body).map_err(|source| LookupError::Parse {
                token: token.to_string(),
                source,
            })?;

        debug!(token, candidates = response.data.len(), "Feature query answered");
        Ok(response.data.into_iter().map(CompatibilityRecord::from).collect())
    }

    /// Resolves `token` to its best-matching record.
    ///
    /// `Ok(None)` means the service knows no feature for the token.
    ///
    /// ## Errors
    ///
    /// Same as [`CompatClient::query`]; the caller decides how to degrade.
    #[instrument(skip(self))]
    pub async fn resolve_one(
        &self,
        token: &str,
    ) -> Result<Option<CompatibilityRecord>, LookupError> {
        let candidates = self.query(token).await?;
        Ok(select_best_match(token, candidates))
    }

    /// Resolves each token in order, pausing between requests.
    ///
    /// Never fails: a token whose lookup errors is logged and mapped to
    /// `None`. Repeated tokens are looked up once. An empty input issues no
    /// requests.
    #[instrument(skip_all, fields(pacing_ms = self.config.pacing.as_millis() as u64))]
    pub async fn resolve_many<I, S>(&self, tokens: I) -> ResolvedBatch
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = ResolvedBatch::default();

        for token in tokens {
            let token = token.as_ref();
            if batch.contains(token) {
                continue;
            }

            if !batch.is_empty() && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }

            let record = match self.resolve_one(token).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(token, error = %e, "Lookup failed, recording no data");
                    batch.failed += 1;
                    None
                }
            };
            batch.push(token.to_string(), record);
        }

        info!(
            resolved = batch.iter().filter(|(_, r)| r.is_some()).count(),
            failed = batch.failed,
            total = batch.len(),
            "Batch lookup complete"
        );
        batch
    }

    async fn fetch_body(&self, token: &str) -> Result<String, LookupError> {
        let mut attempt = 0;

        loop {
            let response = self
                .http
                .get(&self.config.endpoint)
                .query(&[("q", token)])
                .timeout(self.config.request_timeout)
                .send()
                .await
                .map_err(|source| LookupError::Transport {
                    token: token.to_string(),
                    source,
                })?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.config.max_retries {
                    let delay = self.config.backoff_delay(attempt);
                    warn!(token, retry = attempt + 1, ?delay, "Rate limited, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                return Err(LookupError::RateLimited {
                    token: token.to_string(),
                });
            }
            if !status.is_success() {
                return Err(LookupError::Status {
                    token: token.to_string(),
                    status: status.as_u16(),
                });
            }

            return response.text().await.map_err(|source| LookupError::Transport {
                token: token.to_string(),
                source,
            });
        }
    }
}
