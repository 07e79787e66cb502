//! Typed configuration, read from the environment.
//!
//! Variables are prefixed with `FORM_ACTIONS` and nest with `__`, so
//! `FORM_ACTIONS__STORAGE__BACKEND=memory` sets `storage.backend`. A `.env`
//! file is honoured in development. Every key has a default.
//!
//! ```no_run
//! use form_actions::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("invalid configuration");
//! println!("listening on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod forms;
mod responses;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use forms::FormsConfig;
pub use responses::ResponsesConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "FORM_ACTIONS";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Document store holding the response templates
    pub storage: StorageConfig,
    pub responses: ResponsesConfig,
    pub forms: FormsConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the prefixed environment.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source = config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR);
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// [`AppConfig::load`] followed by [`AppConfig::validate`].
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks each section in turn and reports the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.responses.validate()?;
        self.forms.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Environment variables are process-wide.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "FORM_ACTIONS__SERVER__PORT",
        "FORM_ACTIONS__SERVER__ENVIRONMENT",
        "FORM_ACTIONS__SERVER__CORS_ENABLED",
        "FORM_ACTIONS__STORAGE__BACKEND",
        "FORM_ACTIONS__STORAGE__STATE_FOLDER",
        "FORM_ACTIONS__RESPONSES__BOT_ID",
        "FORM_ACTIONS__FORMS__DEFINITIONS_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 5055);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.responses.bot_id, "workshop");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FORM_ACTIONS__SERVER__PORT", "3000");
        env::set_var("FORM_ACTIONS__SERVER__CORS_ENABLED", "false");
        env::set_var("FORM_ACTIONS__STORAGE__BACKEND", "memory");
        env::set_var("FORM_ACTIONS__STORAGE__STATE_FOLDER", "/tmp/state");
        env::set_var("FORM_ACTIONS__RESPONSES__BOT_ID", "helpdesk");
        env::set_var("FORM_ACTIONS__FORMS__DEFINITIONS_DIR", "forms");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(!config.server.cors_enabled);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.state_folder, PathBuf::from("/tmp/state"));
        assert_eq!(config.responses.bot_id, "helpdesk");
        assert_eq!(config.forms.definitions_dir, Some(PathBuf::from("forms")));
    }

    #[test]
    fn test_load_validated_rejects_invalid_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FORM_ACTIONS__SERVER__PORT", "0");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::InvalidPort))
        ));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FORM_ACTIONS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.responses.bot_id = String::new();

        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }
}
