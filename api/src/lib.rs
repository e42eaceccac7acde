//! HTTP surface for the Product Analyzer backend.
//!
//! Routes:
//! - `GET  /`            — liveness message
//! - `POST /api/compare` — compare two products
//! - `POST /api/find`    — find products by criteria
//! - `POST /api/updates` — latest updates for a category

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{
    core::app_state::AppState,
    routes::{
        compare::compare_route::compare_route, find::find_route::find_route,
        health_route::health, updates::updates_route::updates_route,
    },
};

/// Default bind address, matching the original deployment.
const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

/// Builds the application state from the environment, assembles the router,
/// and serves until ctrl-c.
///
/// # Errors
/// - [`AppError::Config`] when `PERPLEXITY_API_KEY` is missing or invalid
/// - [`AppError::Bind`] / [`AppError::Server`] for listener/server io errors
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.into());

    let app = Router::new()
        .route("/", get(health))
        .route("/api/compare", post(compare_route))
        .route("/api/find", post(find_route))
        .route("/api/updates", post(updates_route))
        .with_state(state)
        .layer(cors_layer());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    info!(%addr, "Product Analyzer API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Permissive CORS by default (any origin, method, header). Setting
/// `CORS_ALLOW_ORIGIN` narrows access to that one exact origin, which is
/// what production deployments should do.
fn cors_layer() -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match env::var("CORS_ALLOW_ORIGIN")
        .ok()
        .and_then(|v| v.parse::<HeaderValue>().ok())
    {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}

/// Returns a future that resolves when ctrl-c is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
