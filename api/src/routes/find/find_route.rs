//! POST /api/find — product discovery from free-text criteria.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    core::app_state::AppState, error_handler::AppResult, routes::find::find_request::FindRequest,
};

/// Handler: POST /api/find
///
/// Returns an array of product records (`id`, `name`, `description`, `price`,
/// `features`, `category`, `brand`, `rating`, `releaseDate`, `imageUrl`).
/// Record ids are always strings; other fields pass through as extracted.
/// Answers with no recoverable JSON yield 422.
#[instrument(name = "find_route", skip(state, body))]
pub async fn find_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FindRequest>, JsonRejection>,
) -> AppResult<Json<Vec<Value>>> {
    let Json(body) = body?;
    let products = state.answers.find_products(&body.criteria).await?;
    Ok(Json(products))
}
