//! Client configuration.
//!
//! Defaults target the public webstatus.dev API. Every value can be overridden
//! from the environment (see [`CompatConfig::from_env`]) or with the `with_*`
//! setters.

use crate::error::ConfigError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Feature query endpoint of the public web-status service.
pub const DEFAULT_ENDPOINT: &str = "https://api.webstatus.dev/v1/features";

/// Environment variable overriding the feature query endpoint.
pub const ENDPOINT_ENV: &str = "BASELINE_API_URL";

/// Environment variable overriding the per-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "BASELINE_TIMEOUT_SECS";

/// Environment variable overriding the delay between batch requests, in milliseconds.
pub const PACING_ENV: &str = "BASELINE_PACING_MS";

/// Environment variable overriding how often a rate-limited request is retried.
pub const MAX_RETRIES_ENV: &str = "BASELINE_MAX_RETRIES";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_PACING: Duration = Duration::from_millis(100);
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Settings for [`CompatClient`](crate::compat::CompatClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatConfig {
    /// Query-by-name endpoint; the token is sent as the `q` query parameter.
    pub endpoint: String,
    /// Timeout applied to each request.
    pub request_timeout: Duration,
    /// Fixed delay inserted between consecutive requests of a batch.
    pub pacing: Duration,
    /// Retries allowed after an HTTP 429. Zero disables retrying.
    pub max_retries: u32,
    /// First backoff delay after a 429; doubled on every further attempt.
    pub initial_backoff: Duration,
    /// Upper bound for the backoff delay.
    pub max_backoff: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            pacing: DEFAULT_PACING,
            max_retries: 0,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            user_agent: concat!("baseline-lib/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CompatConfig {
    /// Builds a configuration from the defaults plus any `BASELINE_*`
    /// environment overrides.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidValue` when a numeric variable cannot be
    /// parsed or the endpoint is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var(ENDPOINT_ENV) {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: ENDPOINT_ENV,
                    value: endpoint.to_string(),
                    reason: "endpoint must not be empty".to_string(),
                });
            }
            config.endpoint = endpoint.to_string();
        }
        if let Some(secs) = parse_env::<u64>(TIMEOUT_ENV)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(millis) = parse_env::<u64>(PACING_ENV)? {
            config.pacing = Duration::from_millis(millis);
        }
        if let Some(retries) = parse_env::<u32>(MAX_RETRIES_ENV)? {
            config.max_retries = retries;
        }

        Ok(config)
    }

    /// Sets the query endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the delay between batch requests.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enables exponential backoff on HTTP 429 with the given retry budget.
    pub fn with_backoff(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    /// Backoff delay before retry number `attempt` (zero-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

fn parse_env<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var,
                value: raw,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
