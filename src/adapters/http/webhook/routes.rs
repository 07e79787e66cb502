//! HTTP routes for the action webhook.

use std::sync::Arc;

use axum::{routing::post, Router};

use super::handlers::run_action;
use crate::application::RunActionHandler;

/// Creates the webhook router.
pub fn webhook_routes(handler: Arc<RunActionHandler>) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .with_state(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::ErrorResponse;
    use crate::adapters::storage::InMemoryDocumentStore;
    use crate::application::ResponsesService;
    use crate::domain::action::ActionRegistry;
    use crate::domain::form::FormEngine;
    use crate::domain::forms::OpenIncidentForm;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let store = Arc::new(InMemoryDocumentStore::default());
        let responses = ResponsesService::with_defaults(store).await.unwrap();
        let mut registry = ActionRegistry::new();
        registry.register(FormEngine::new(OpenIncidentForm::new())).unwrap();
        webhook_routes(Arc::new(RunActionHandler::new(
            Arc::new(registry),
            Arc::new(responses),
        )))
    }

    async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn runs_registered_form() {
        let body = json!({
            "next_action": "open_incident_form",
            "sender_id": "u1",
            "tracker": {"sender_id": "u1", "slots": {}, "latest_message": {"text": "hi"}}
        });

        let (status, json) = post_json(app().await, body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["events"][0], json!({"event": "form", "name": "open_incident_form"}));
        assert_eq!(
            json["events"][1],
            json!({"event": "slot", "name": "requested_slot", "value": "incident_title"})
        );
        assert_eq!(json["responses"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejection_returns_400_with_action_name() {
        let body = json!({
            "next_action": "open_incident_form",
            "tracker": {
                "latest_action_name": "action_listen",
                "slots": {"requested_slot": "confirm"},
                "latest_message": {"text": "hello", "intent": {"name": "greet", "confidence": 1.0}},
                "active_form": {"name": "open_incident_form", "validate": true}
            }
        });

        let (status, json) = post_json(app().await, body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_value(json).unwrap();
        assert_eq!(error.code, "SLOT_REJECTED");
        assert_eq!(error.action_name.as_deref(), Some("open_incident_form"));
        assert_eq!(
            error.error,
            "Failed to extract slot 'confirm' in action 'open_incident_form'"
        );
    }

    #[tokio::test]
    async fn unknown_action_returns_404() {
        let body = json!({"next_action": "action_nope", "tracker": {}});

        let (status, json) = post_json(app().await, body.to_string()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "UNSUPPORTED_ACTION");
        assert!(json.get("action_name").is_none());
    }

    #[tokio::test]
    async fn malformed_json_returns_400() {
        let (status, json) = post_json(app().await, "{not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_PAYLOAD");
    }

    #[tokio::test]
    async fn wrongly_shaped_payload_returns_400() {
        let body = json!({"next_action": "open_incident_form", "tracker": {"slots": []}});

        let (status, _) = post_json(app().await, body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
