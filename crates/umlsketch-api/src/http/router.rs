//! Axum router configuration with middleware.
//!
//! Each diagram endpoint is mounted twice: under `/api/` and under the legacy
//! `/.netlify/functions/` prefix that existing browser clients still call.
//! Only POST is routed; any other verb gets 405.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{MethodRouter, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/generate", generate_route())
        .route("/api/render", render_route())
        .route("/.netlify/functions/generate", generate_route())
        .route("/.netlify/functions/render", render_route())
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn generate_route() -> MethodRouter<AppState> {
    post(handlers::generate::generate_diagram).fallback(method_not_allowed)
}

fn render_route() -> MethodRouter<AppState> {
    post(handlers::render::render_diagram).fallback(method_not_allowed)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
