pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::AppState;

/// The complete HTTP application: routes plus the configured layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = handlers::routes(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    // CorsLayer answers every OPTIONS itself, so it only goes on when origins are set
    if config.security.enable_cors && !config.security.cors_origins.is_empty() {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::database::MemoryRecordStore;

    fn configured_app(extra: &[(&str, &str)]) -> Router {
        let mut vars = vec![("API_KEY", "K"), ("TRAVEL_LOG_STORE", "memory")];
        vars.extend_from_slice(extra);
        let config = AppConfig::from_lookup(|key: &str| {
            vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
        })
        .unwrap();

        let state = AppState::new(
            Arc::new(MemoryRecordStore::new()),
            config.security.api_key.clone(),
        );
        app(state, &config)
    }

    #[tokio::test]
    async fn options_is_not_allowed_with_default_config() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/logs")
            .body(Body::empty())
            .unwrap();
        let response = configured_app(&[]).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Method is not allowed." }));
    }

    #[tokio::test]
    async fn configured_origins_answer_preflight() {
        let app = configured_app(&[("SECURITY_CORS_ORIGINS", "https://app.example.com")]);
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/logs")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://app.example.com"
        );
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = configured_app(&[("API_MAX_REQUEST_SIZE_BYTES", "16")]);
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/logs")
            .body(Body::from(r#"{ "logID": "this body is longer than sixteen bytes" }"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
