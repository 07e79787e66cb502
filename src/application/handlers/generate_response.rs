//! GenerateResponseHandler - renders one template for a bot.

use std::sync::Arc;

use serde_json::Value;

use crate::application::{ResponsesError, ResponsesService};

#[derive(Debug, Clone)]
pub struct GenerateResponseCommand {
    pub bot_id: String,
    pub template: String,
}

/// Handler for the responses API.
pub struct GenerateResponseHandler {
    service: Arc<ResponsesService>,
}

impl GenerateResponseHandler {
    pub fn new(service: Arc<ResponsesService>) -> Self {
        Self { service }
    }

    pub async fn handle(&self, cmd: GenerateResponseCommand) -> Result<Value, ResponsesError> {
        if cmd.template.trim().is_empty() {
            return Err(ResponsesError::InvalidPayload(
                "'template' must not be empty".to_string(),
            ));
        }

        self.service
            .generate_response(&cmd.bot_id, &cmd.template)
            .await
    }
}
