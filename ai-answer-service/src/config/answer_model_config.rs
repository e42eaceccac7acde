/// Configuration for one answer API invocation profile.
///
/// # Fields
///
/// - `model`: The model identifier (e.g. `"sonar"`).
/// - `endpoint`: Base URL of the answer API.
/// - `api_key`: Bearer credential; required by the hosted API.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `search_recency_filter`: Restricts search-backed answers to a recent
///   window (e.g. `"month"`). Ignored by the remote for non-search models.
/// - `timeout_secs`: Hard per-request timeout in seconds.
#[derive(Debug, Clone)]
pub struct AnswerModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Answer API base URL.
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Search recency window (`"day"`, `"week"`, `"month"`, `"year"`).
    pub search_recency_filter: Option<String>,

    /// Request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
