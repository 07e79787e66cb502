//! RunActionHandler - runs one webhook call end to end.
//!
//! Dispatches the request to the named action, then resolves the template
//! names it selected into response bodies from the default bot's document.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{ResponsesError, ResponsesService};
use crate::domain::action::{ActionError, ActionRegistry, ActionRequest};
use crate::domain::events::Event;
use crate::domain::foundation::ErrorCode;

/// Outbound webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<Value>,
}

/// Everything that can go wrong while serving a webhook call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WebhookError {
    #[error("Invalid action request: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Responses(#[from] ResponsesError),
}

impl WebhookError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WebhookError::InvalidPayload(_) => ErrorCode::InvalidPayload,
            WebhookError::Action(e) => e.code(),
            WebhookError::Responses(e) => e.code(),
        }
    }
}

pub struct RunActionHandler {
    registry: Arc<ActionRegistry>,
    responses: Arc<ResponsesService>,
}

impl RunActionHandler {
    pub fn new(registry: Arc<ActionRegistry>, responses: Arc<ResponsesService>) -> Self {
        Self {
            registry,
            responses,
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Parses a raw webhook body and runs it.
    pub async fn handle_json(&self, payload: Value) -> Result<ActionResponse, WebhookError> {
        let request: ActionRequest = serde_json::from_value(payload)
            .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;
        self.handle(request).await
    }

    pub async fn handle(&self, request: ActionRequest) -> Result<ActionResponse, WebhookError> {
        if request.next_action.is_empty() {
            return Err(WebhookError::InvalidPayload(
                "'next_action' must not be empty".to_string(),
            ));
        }

        let outcome = self.registry.dispatch(&request).map_err(|e| {
            if e.is_rejection() {
                warn!("{}", e);
            }
            e
        })?;

        let responses = self
            .responses
            .resolve_templates(self.responses.default_bot_id(), &outcome.templates)
            .await?;

        debug!(
            "{} returned {} events and {} responses",
            request.next_action,
            outcome.events.len(),
            responses.len()
        );

        Ok(ActionResponse {
            events: outcome.events,
            responses,
        })
    }
}
