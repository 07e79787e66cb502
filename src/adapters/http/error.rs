//! Error body shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::{ResponsesError, WebhookError};
use crate::domain::action::ActionError;
use crate::domain::foundation::ErrorCode;
use crate::ports::DocumentError;

/// Message returned for failures whose detail is only logged.
pub const GENERIC_ERROR_MESSAGE: &str = "Unable to process request";

/// JSON error body.
///
/// `action_name` is only set for slot rejections, so the orchestrator can
/// tell which action to fall back from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            error: error.into(),
            action_name: None,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPayload, error)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, GENERIC_ERROR_MESSAGE)
    }

    pub fn with_action_name(mut self, action_name: impl Into<String>) -> Self {
        self.action_name = Some(action_name.into());
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn storage_error(error: &DocumentError) -> Response {
    let status = match error {
        DocumentError::NotFound(_) => StatusCode::NOT_FOUND,
        DocumentError::AlreadyExists(_) => StatusCode::CONFLICT,
        DocumentError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DocumentError::Io(_) | DocumentError::Serialization(_) => {
            error!("Storage failure: {}", error);
            return ErrorResponse::internal().into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    ErrorResponse::new(error.code(), error.to_string()).into_response_with(status)
}

pub fn responses_error(error: &ResponsesError) -> Response {
    match error {
        ResponsesError::Storage(e) => storage_error(e),
        ResponsesError::UnknownTemplate { .. } => {
            ErrorResponse::new(error.code(), error.to_string()).into_response_with(StatusCode::NOT_FOUND)
        }
        ResponsesError::InvalidPayload(_) => {
            ErrorResponse::new(error.code(), error.to_string())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    }
}

pub fn webhook_error(error: &WebhookError, action_name: &str) -> Response {
    match error {
        WebhookError::InvalidPayload(_) => {
            ErrorResponse::new(error.code(), error.to_string())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        WebhookError::Action(e @ ActionError::Rejected { .. }) => {
            ErrorResponse::new(e.code(), e.to_string())
                .with_action_name(action_name)
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        WebhookError::Action(e) => {
            ErrorResponse::new(e.code(), e.to_string()).into_response_with(StatusCode::NOT_FOUND)
        }
        WebhookError::Responses(e) => responses_error(e),
    }
}
