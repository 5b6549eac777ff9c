// handlers/mod.rs - route table and shared state
//
// /           service info (public)
// /health     record store liveness (public)
// /api/logs   travel log CRUD, routed by method

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::config::ApiKey;
use crate::database::RecordStore;

pub mod logs;

/// Per-process state handed to every handler.
///
/// Holds no mutable data of its own; all mutation goes through the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, api_key: ApiKey) -> Self {
        Self { store, api_key }
    }
}

/// All routes with state applied, without the HTTP layers added in `app`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/api/logs",
            get(logs::get)
                .post(logs::post)
                .patch(logs::patch)
                .delete(logs::delete)
                .fallback(logs::method_not_allowed),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Travel Log API",
        "version": version,
        "endpoints": {
            "logs": "/api/logs (GET public; POST, PATCH require apiKey; DELETE requires logID)",
            "health": "/health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                })),
            )
        }
    }
}
