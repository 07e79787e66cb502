//! Document storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::ports::validate_id;

/// Which document store backs the responses.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database name; also the folder name under `state_folder`
    #[serde(default = "default_db_name")]
    pub db_name: String,

    #[serde(default = "default_state_folder")]
    pub state_folder: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(&self.db_name).map_err(|_| ValidationError::InvalidIdentifier {
            field: "storage.db_name",
            value: self.db_name.clone(),
        })?;
        if self.backend == StorageBackend::File && self.state_folder.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.state_folder"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            db_name: default_db_name(),
            state_folder: default_state_folder(),
        }
    }
}

fn default_db_name() -> String {
    "rasa".to_string()
}

fn default_state_folder() -> PathBuf {
    PathBuf::from(".state")
}
