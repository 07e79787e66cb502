//! Top-level router: every route plus the shared middleware stack.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::responses::responses_routes;
use super::webhook::webhook_routes;
use crate::application::{GenerateResponseHandler, RunActionHandler};
use crate::config::ServerConfig;

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Builds the application router.
pub fn build_router(
    webhook: Arc<RunActionHandler>,
    responses: Arc<GenerateResponseHandler>,
    config: &ServerConfig,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(webhook_routes(webhook))
        .nest("/api/v1/responses", responses_routes(responses))
        .layer(DefaultBodyLimit::disable());

    if let Some(limit) = config.body_limit_bytes {
        router = router.layer(RequestBodyLimitLayer::new(limit));
    }

    router = router
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        router = router.layer(cors_layer(config));
    }

    router
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("CORS allows any origin");
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDocumentStore;
    use crate::application::ResponsesService;
    use crate::domain::action::ActionRegistry;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn app(config: ServerConfig) -> Router {
        let store = Arc::new(InMemoryDocumentStore::default());
        let responses = Arc::new(ResponsesService::with_defaults(store).await.unwrap());
        build_router(
            Arc::new(RunActionHandler::new(
                Arc::new(ActionRegistry::new()),
                responses.clone(),
            )),
            Arc::new(GenerateResponseHandler::new(responses)),
            &config,
        )
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app(ServerConfig::default())
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app(ServerConfig::default())
            .await
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = ServerConfig {
            body_limit_bytes: Some(16),
            ..Default::default()
        };
        let body = json!({"next_action": "open_incident_form", "tracker": {}}).to_string();

        let response = app(config)
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn cors_echoes_configured_origin() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            ..Default::default()
        };

        let response = app(config)
            .await
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn cors_can_be_disabled() {
        let config = ServerConfig {
            cors_enabled: false,
            ..Default::default()
        };

        let response = app(config)
            .await
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
