//! Perplexity answer API service.
//!
//! Minimal, non-streaming client around the Perplexity REST API:
//! - POST {endpoint}/chat/completions — chat completion with web search
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Exactly one outbound request per call, no retries; a slow remote holds
//! the caller until the client timeout fires.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::answer_model_config::AnswerModelConfig,
    config::default_config::API_KEY_ENV,
    error_handler::{AiAnswerError, ConfigError, make_snippet, validate_http_endpoint},
};

/// Thin client for the Perplexity API.
///
/// Constructed from a complete [`AnswerModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct PerplexityService {
    client: reqwest::Client,
    cfg: AnswerModelConfig,
    url_chat: String,
}

impl PerplexityService {
    /// Creates a new [`PerplexityService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is `None`
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not http(s)
    /// - [`AiAnswerError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: AnswerModelConfig) -> Result<Self, AiAnswerError> {
        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ConfigError::MissingVar(API_KEY_ENV))?;

        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("PERPLEXITY_URL", endpoint)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
                ConfigError::InvalidFormat {
                    var: API_KEY_ENV,
                    reason: "not a valid header value",
                }
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/chat/completions", endpoint.trim_end_matches('/'));

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "PerplexityService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs one **non-streaming** chat completion request.
    ///
    /// The `messages` array is always `[system, user]`; model, temperature,
    /// max tokens, and the search recency filter come from the config.
    ///
    /// # Errors
    /// - [`AiAnswerError::Upstream`] for non-2xx responses, carrying the
    ///   remote status and body text verbatim
    /// - [`AiAnswerError::HttpTransport`] for client/network failures,
    ///   including the request timeout
    /// - [`AiAnswerError::Decode`] if the JSON envelope cannot be parsed
    /// - [`AiAnswerError::EmptyChoices`] if no choices carry content
    pub async fn answer(&self, prompt: &str, system: &str) -> Result<String, AiAnswerError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();

            error!(
                %status,
                snippet = %make_snippet(&text),
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Perplexity chat/completions returned non-success status"
            );

            return Err(AiAnswerError::Upstream { status, body: text });
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode chat/completions response"
                );
                return Err(AiAnswerError::Decode(format!(
                    "serde error: {e}; expected `choices[0].message.content`"
                )));
            }
        };

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(AiAnswerError::EmptyChoices)?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_recency_filter: Option<&'a str>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds the chat request from config, `prompt`, and the system message.
    fn from_cfg(cfg: &'a AnswerModelConfig, prompt: &'a str, system: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            search_recency_filter: cfg.search_recency_filter.as_deref(),
        }
    }
}

/// Chat message for the answer API.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    /// One of: "system" | "user".
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnswerModelConfig {
        AnswerModelConfig {
            model: "sonar".into(),
            endpoint: "https://api.perplexity.ai".into(),
            api_key: Some("pplx-test".into()),
            max_tokens: Some(1000),
            temperature: Some(0.2),
            search_recency_filter: Some("month".into()),
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn constructor_requires_api_key() {
        let mut c = cfg();
        c.api_key = None;
        let err = PerplexityService::new(c).unwrap_err();
        assert!(matches!(
            err,
            AiAnswerError::Config(ConfigError::MissingVar(API_KEY_ENV))
        ));
    }

    #[test]
    fn constructor_rejects_non_http_endpoint() {
        let mut c = cfg();
        c.endpoint = "api.perplexity.ai".into();
        assert!(PerplexityService::new(c).is_err());
    }

    #[test]
    fn request_body_carries_fixed_parameters() {
        let c = cfg();
        let body = ChatCompletionRequest::from_cfg(&c, "compare A and B", "You are an expert.");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "sonar");
        assert_eq!(json["temperature"], 0.2);
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["search_recency_filter"], "month");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "compare A and B");
    }

    #[test]
    fn chat_url_tolerates_trailing_slash() {
        let mut c = cfg();
        c.endpoint = "https://api.perplexity.ai/".into();
        let svc = PerplexityService::new(c).unwrap();
        assert_eq!(svc.url_chat, "https://api.perplexity.ai/chat/completions");
    }
}
