//! Form configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::form::DEFAULT_ASK_TEMPLATE_PREFIX;

#[derive(Debug, Clone, Deserialize)]
pub struct FormsConfig {
    /// Directory of YAML form definitions registered next to the built-in forms
    #[serde(default)]
    pub definitions_dir: Option<PathBuf>,

    /// Prefix of the template that asks for a slot
    #[serde(default = "default_ask_template_prefix")]
    pub ask_template_prefix: String,
}

impl FormsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ask_template_prefix.trim().is_empty() {
            return Err(ValidationError::MissingRequired("forms.ask_template_prefix"));
        }
        Ok(())
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            definitions_dir: None,
            ask_template_prefix: default_ask_template_prefix(),
        }
    }
}

fn default_ask_template_prefix() -> String {
    DEFAULT_ASK_TEMPLATE_PREFIX.to_string()
}
