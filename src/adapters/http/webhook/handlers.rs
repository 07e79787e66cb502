//! HTTP handler for the action webhook.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::adapters::http::error::{webhook_error, ErrorResponse};
use crate::application::RunActionHandler;

/// POST /webhook - Run one action for one dialogue turn
pub async fn run_action(
    State(handler): State<Arc<RunActionHandler>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected webhook body: {}", rejection.body_text());
            return ErrorResponse::bad_request(rejection.body_text())
                .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    let action = payload
        .get("next_action")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let sender_id = payload
        .get("sender_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let span = info_span!(
        "webhook",
        action = %action,
        sender_id = %sender_id,
        turn_id = %Uuid::new_v4(),
    );

    match handler.handle_json(payload).instrument(span).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => webhook_error(&e, &action),
    }
}
