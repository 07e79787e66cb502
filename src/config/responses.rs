//! Response template configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::validate_id;

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesConfig {
    /// Collection holding one response document per bot
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Bot whose templates answer webhook calls
    #[serde(default = "default_bot_id")]
    pub bot_id: String,
}

impl ResponsesConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("responses.collection", &self.collection),
            ("responses.bot_id", &self.bot_id),
        ] {
            validate_id(value).map_err(|_| ValidationError::InvalidIdentifier {
                field,
                value: value.clone(),
            })?;
        }
        Ok(())
    }
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            bot_id: default_bot_id(),
        }
    }
}

fn default_collection() -> String {
    "responses".to_string()
}

fn default_bot_id() -> String {
    "workshop".to_string()
}
