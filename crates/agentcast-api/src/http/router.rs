//! Axum router configuration with middleware.
//!
//! JSON routes live under `/api/v1/`; the WebSocket session is at `/ws`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use agentcast_types::artifact::MAX_ARTIFACT_SIZE_BYTES;

use crate::http::handlers;
use crate::state::AppState;

/// Room for multipart framing on top of the largest accepted file.
const UPLOAD_BODY_OVERHEAD: usize = 64 * 1024;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = MAX_ARTIFACT_SIZE_BYTES as usize + UPLOAD_BODY_OVERHEAD;

    let api_routes = Router::new()
        // Agents
        .route("/agents", get(handlers::agents::list_agents))
        .route("/run/{agent_type}", post(handlers::agents::run_agent))
        // Artifacts
        .route(
            "/upload",
            post(handlers::artifacts::upload_artifact).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/artifacts", get(handlers::artifacts::list_artifacts))
        .route(
            "/download/{filename}",
            get(handlers::artifacts::download_artifact),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
