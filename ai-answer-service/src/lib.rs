//! Gateway to the Perplexity answer API plus the free-text → JSON extractor.
//!
//! The crate exposes one facade, [`AiAnswerService`]: construct it once from
//! an [`AnswerModelConfig`](config::AnswerModelConfig), wrap it in `Arc`, and
//! hand clones to request handlers. Each operation builds the prompt for a
//! typed [`Query`](query::Query), performs exactly one outbound network call,
//! and coerces the free-text answer into the expected JSON shape.
//!
//! Identical queries are served from a single-flight memo cache; failures
//! are never cached.

pub mod config;
pub mod error_handler;
pub mod extract;
pub mod query;
pub mod services;
pub mod telemetry;

mod cache;

use serde_json::Value;
use tracing::debug;

use crate::cache::AnswerCache;
use crate::config::AnswerModelConfig;
use crate::error_handler::{AiAnswerError, Result};
use crate::extract::extract_value;
use crate::query::Query;
use crate::services::PerplexityService;

/// Cached distinct queries before the coarse evict-all kicks in.
const CACHE_CAPACITY: usize = 100;

/// Facade over the answer API: prompt building, the single outbound call,
/// extraction, and the memo cache.
pub struct AiAnswerService {
    perplexity: PerplexityService,
    cache: AnswerCache<Query, Value>,
}

impl AiAnswerService {
    /// Creates the service from an explicit config.
    pub fn new(cfg: AnswerModelConfig) -> Result<Self> {
        Ok(Self {
            perplexity: PerplexityService::new(cfg)?,
            cache: AnswerCache::new(CACHE_CAPACITY),
        })
    }

    /// Creates the service from environment variables.
    ///
    /// # Errors
    /// Fails when `PERPLEXITY_API_KEY` is missing, so a misconfigured
    /// process refuses to start.
    pub fn from_env() -> Result<Self> {
        Self::new(config::config_sonar()?)
    }

    /// Compares two products head to head.
    ///
    /// Returns the comparison object. When the answer cannot be coerced into
    /// JSON this does **not** fail: the result is a fallback record holding
    /// the raw answer under `rawContent` plus a parse-error marker.
    pub async fn compare_products(&self, product1: &str, product2: &str) -> Result<Value> {
        self.answer_query(Query::Compare {
            product1: product1.to_string(),
            product2: product2.to_string(),
        })
        .await
    }

    /// Finds products matching free-text criteria.
    ///
    /// # Errors
    /// [`AiAnswerError::Extraction`] when no product list can be recovered
    /// from the answer.
    pub async fn find_products(&self, criteria: &str) -> Result<Vec<Value>> {
        let value = self
            .answer_query(Query::Find {
                criteria: criteria.to_string(),
            })
            .await?;
        Ok(into_records(value))
    }

    /// Fetches recent updates and news for a product category.
    ///
    /// # Errors
    /// [`AiAnswerError::Extraction`] when no update list can be recovered
    /// from the answer.
    pub async fn product_updates(&self, category: &str) -> Result<Vec<Value>> {
        let value = self
            .answer_query(Query::Updates {
                category: category.to_string(),
            })
            .await?;
        Ok(into_records(value))
    }

    /// One query → one network call → extraction, memoized per query value.
    async fn answer_query(&self, query: Query) -> Result<Value> {
        let shape = query.expected_shape();
        let prompt = query.user_prompt();
        let system = query.system_prompt();

        self.cache
            .get_or_try_compute(query, || async move {
                let raw = self.perplexity.answer(&prompt, system).await?;
                debug!(answer_len = raw.len(), "extracting structured answer");
                Ok::<_, AiAnswerError>(extract_value(&raw, shape)?)
            })
            .await
    }
}

/// Array shapes are normalized to `Value::Array` by the extractor; unwrap
/// into the record list without panicking on the impossible case.
fn into_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(records) => records,
        other => vec![other],
    }
}
