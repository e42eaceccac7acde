//! POST /api/updates — recent news and releases for a category.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::updates::updates_request::UpdatesRequest,
};

/// Handler: POST /api/updates
///
/// Returns an array of update records (`id`, `title`, `description`, `date`,
/// `category`, `imageUrl`, `source`, `url`), ids stringified. Answers with
/// no recoverable JSON yield 422.
#[instrument(name = "updates_route", skip(state, body))]
pub async fn updates_route(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdatesRequest>, JsonRejection>,
) -> AppResult<Json<Vec<Value>>> {
    let Json(body) = body?;
    let updates = state.answers.product_updates(&body.category).await?;
    Ok(Json(updates))
}
