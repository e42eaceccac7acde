//! GET / — liveness message.

use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "Product Analyzer API is running" }))
}
