//! POST /api/compare — head-to-head comparison of two products.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::compare::compare_request::CompareRequest,
};

/// Handler: POST /api/compare
///
/// Returns the comparison object built from the answer API's reply. When the
/// reply cannot be coerced into JSON the response is a fallback record with
/// the raw answer under `rawContent` — this route never fails on extraction.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/compare \
///   -H 'content-type: application/json' \
///   -d '{"product1":"iPhone 16","product2":"Pixel 9"}'
/// ```
#[instrument(name = "compare_route", skip(state, body))]
pub async fn compare_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(body) = body?;
    let comparison = state
        .answers
        .compare_products(&body.product1, &body.product2)
        .await?;
    Ok(Json(comparison))
}
