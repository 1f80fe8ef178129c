//! Error types for compatibility lookups and client configuration.
//!
//! Lookup failures always carry the token that was being resolved so that a
//! batch can record the failure against the right entry and keep going.

use thiserror::Error;

/// A failed attempt to resolve one token against the feature service.
///
/// "No match" is not an error; it is reported as `Ok(None)` by the client.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, timeout) or the
    /// body could not be read.
    #[error("request for `{token}` failed: {source}")]
    Transport {
        token: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status.
    #[error("feature service returned HTTP {status} for `{token}`")]
    Status { token: String, status: u16 },

    /// The service kept answering HTTP 429 after all configured retries.
    #[error("feature service rate limited the request for `{token}`")]
    RateLimited { token: String },

    /// The body was not valid JSON or did not match the response schema.
    #[error("could not parse feature response for `{token}`: {source}")]
    Parse {
        token: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LookupError {
    /// The token whose lookup failed.
    pub fn token(&self) -> &str {
        match self {
            Self::Transport { token, .. }
            | Self::Status { token, .. }
            | Self::RateLimited { token }
            | Self::Parse { token, .. } => token,
        }
    }

    /// Returns `true` when the response arrived but could not be understood.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Errors raised while building a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be used.
    #[error("invalid value `{value}` for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_token_is_available_on_every_variant() {
        let errors = [
            LookupError::Status {
                token: "div".to_string(),
                status: 500,
            },
            LookupError::RateLimited {
                token: "div".to_string(),
            },
            LookupError::Parse {
                token: "div".to_string(),
                source: parse_error(),
            },
        ];

        for error in &errors {
            assert_eq!(error.token(), "div");
        }
    }

    #[test]
    fn test_display_mentions_token() {
        let error = LookupError::Status {
            token: "grid".to_string(),
            status: 503,
        };
        assert_eq!(
            error.to_string(),
            "feature service returned HTTP 503 for `grid`"
        );
    }

    #[test]
    fn test_is_parse_failure() {
        let parse = LookupError::Parse {
            token: "fetch".to_string(),
            source: parse_error(),
        };
        let limited = LookupError::RateLimited {
            token: "fetch".to_string(),
        };

        assert!(parse.is_parse_failure());
        assert!(!limited.is_parse_failure());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::InvalidValue {
            var: "BASELINE_PACING_MS",
            value: "soon".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid value `soon` for BASELINE_PACING_MS: invalid digit found in string"
        );
    }
}
