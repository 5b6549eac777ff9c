// handlers/logs.rs - /api/logs, one endpoint routed by method

use axum::extract::State;
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::{authorize, ApiResponse, ApiResult, JsonBody};
use crate::models::{LogId, TravelLog};

use super::AppState;

pub const LOG_DELETED: &str = "Log is deleted.";
pub const LOG_UPDATED: &str = "Log got updated.";

/**
 * POST /api/logs - Create a travel log
 *
 * Expected Input:
 * ```json
 * { "apiKey": "secret", "title": "Kyoto", "description": "...", "image": "https://...",
 *   "rating": 8, "latitude": 35.01, "longitude": 135.77, "visitDate": "2024-04-02" }
 * ```
 *
 * Returns the validated record with its new `_id`. `apiKey` is never stored.
 */
pub async fn post(State(state): State<AppState>, body: JsonBody) -> ApiResult<Value> {
    authorize(&state.api_key, &body)?;
    let log = TravelLog::parse(&body.0)?;

    let document = log.to_document();
    let id = state.store.insert(document.clone()).await?;
    info!("Created travel log {}", id);

    let mut created = document;
    created.insert("_id".to_string(), Value::String(id.to_string()));
    Ok(ApiResponse::success(Value::Object(created)))
}

/// GET /api/logs - Every stored travel log, in store order
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<Value>> {
    let logs = state.store.find_all().await?;
    Ok(ApiResponse::success(
        logs.into_iter().map(|log| log.into_value()).collect(),
    ))
}

/// DELETE /api/logs - Remove the log named by `logID`.
///
/// Removing an id that no longer exists still succeeds.
pub async fn delete(State(state): State<AppState>, body: JsonBody) -> ApiResult<Value> {
    let log_id = required_log_id(&body)?;
    let id: LogId = log_id.parse()?;

    let removed = state.store.delete(id).await?;
    info!("Deleted travel log {} ({} removed)", id, removed);
    Ok(ApiResponse::message(LOG_DELETED))
}

/// PATCH /api/logs - Set the submitted fields on the log named by `logID`.
///
/// Checks run in order: id present, API key, id well-formed, record valid.
/// Fields not submitted keep their stored values.
pub async fn patch(State(state): State<AppState>, body: JsonBody) -> ApiResult<Value> {
    let log_id = required_log_id(&body)?;
    authorize(&state.api_key, &body)?;
    let id: LogId = log_id.parse()?;
    let fields = TravelLog::parse_update(&body.0)?;

    let changed = state.store.update(id, fields).await?;
    info!("Updated travel log {} ({} changed)", id, changed);
    Ok(ApiResponse::message(LOG_UPDATED))
}

/// Any other method on /api/logs
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

fn required_log_id(body: &JsonBody) -> Result<&str, ApiError> {
    match body.str_field("logID") {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(ApiError::missing_log_id()),
        Err(other) => Err(ApiError::bad_request(format!("Invalid log id: {}", other))),
    }
}
