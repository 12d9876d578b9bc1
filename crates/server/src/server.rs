//! HTTP server for the Serein task tracker.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use serein_core::ai::RewriteProvider;
use serein_core::storage::TaskStore;

use crate::handlers::{rewrite, tasks, voice};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Task persistence.
    pub store: Arc<dyn TaskStore>,
    /// External rewrite provider; handlers fall back to the local rewrite
    /// when it is unconfigured or fails.
    pub rewriter: Arc<dyn RewriteProvider>,
}

/// Build the HTTP router for the task service.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        // Task CRUD
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/api/tasks/export", get(tasks::export_tasks))
        .route("/api/tasks/voice", post(voice::create_from_voice))
        .route(
            "/api/tasks/{id}",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/api/tasks/{id}/rewrite", post(rewrite::rewrite_task))
        // Standalone text rewrite
        .route("/api/ai/rewrite", post(rewrite::rewrite_text))
        // Health check
        .route("/health", get(health_check))
        // Web frontend
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
