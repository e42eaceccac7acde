//! Unified error handling for `ai-answer-service`.
//!
//! One top-level error type [`AiAnswerError`] for the whole crate, with
//! configuration problems grouped in [`ConfigError`]. Small helpers for
//! reading environment variables return the unified [`Result<T>`] alias.

use reqwest::StatusCode;
use thiserror::Error;

use crate::extract::ExtractError;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiAnswerError>;

/// Top-level error for the `ai-answer-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiAnswerError {
    /// Configuration/validation errors (startup time).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Non-success HTTP status from the answer API. `body` is the remote
    /// response text, verbatim, so callers can relay it unchanged.
    #[error("Perplexity API error: {body}")]
    Upstream { status: StatusCode, body: String },

    /// Underlying HTTP transport error, including the request timeout.
    #[error("transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Response envelope could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// The answer API returned 2xx but no choice carried any content.
    #[error("empty choices in answer API response")]
    EmptyChoices,

    /// No structured value could be recovered from a list-shaped answer.
    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (limits, timeouts).
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Value had the wrong format (e.g. invalid URL).
    #[error("invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u32>().map(Some).map_err(|_| {
            AiAnswerError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Short single-line body excerpt for log records. Error payloads keep the
/// full body; this is for tracing output only.
pub(crate) fn make_snippet(body: &str) -> String {
    const MAX: usize = 240;
    let one_line = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.len() <= MAX {
        return one_line;
    }
    let mut end = MAX;
    while !one_line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &one_line[..end])
}
