//! Default answer API config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `PERPLEXITY_API_KEY` = bearer credential (**mandatory**; the process
//!   refuses to start without it)
//! - `PERPLEXITY_URL`     = optional endpoint override
//! - `PERPLEXITY_MODEL`   = optional model override
//!
//! The remaining call parameters are fixed: every query runs with
//! `temperature = 0.2`, `max_tokens = 1000`, a one-month search recency
//! window, and a hard 30 second timeout.

use crate::{
    config::answer_model_config::AnswerModelConfig,
    error_handler::{AiAnswerError, must_env, validate_http_endpoint},
};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai";
const DEFAULT_MODEL: &str = "sonar";

/// Constructs the config for the **sonar** search/answer model.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`](crate::error_handler::ConfigError) if
///   `PERPLEXITY_API_KEY` is absent or empty
/// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError) if
///   `PERPLEXITY_URL` is set but not an http(s) URL
pub fn config_sonar() -> Result<AnswerModelConfig, AiAnswerError> {
    let api_key = must_env(API_KEY_ENV)?;

    let endpoint = std::env::var("PERPLEXITY_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_http_endpoint("PERPLEXITY_URL", &endpoint)?;

    let model = std::env::var("PERPLEXITY_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(AnswerModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(1000),
        temperature: Some(0.2),
        search_recency_filter: Some("month".to_string()),
        timeout_secs: Some(30),
    })
}
