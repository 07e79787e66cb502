//! HTTP server configuration: bind address, logging and the middleware limits
//! applied by the router.

use serde::Deserialize;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

use super::error::ValidationError;

/// Accepted request timeouts, in seconds.
const TIMEOUT_RANGE_SECS: RangeInclusive<u64> = 1..=300;

/// Server configuration. Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    /// 5055 is the port orchestrators expect an action server on.
    pub port: u16,

    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_level: String,

    pub request_timeout_secs: u64,

    /// Maximum request body size; unlimited when unset
    pub body_limit_bytes: Option<usize>,

    pub cors_enabled: bool,

    /// Comma-separated allowed origins; any origin when unset or empty
    pub cors_origins: Option<String>,
}

/// Deployment environment. Production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5055,
            environment: Environment::default(),
            log_level: "info,form_actions=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            body_limit_bytes: None,
            cors_enabled: true,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured CORS origins, trimmed, without empty entries.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(origins) = &self.cors_origins else {
            return Vec::new();
        };
        origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !TIMEOUT_RANGE_SECS.contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if matches!(self.body_limit_bytes, Some(0)) {
            return Err(ValidationError::InvalidBodyLimit);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_action_server_port() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5055");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.cors_enabled);
        assert!(config.body_limit_bytes.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: ServerConfig =
            serde_json::from_value(serde_json::json!({"port": 8080, "environment": "staging"}))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn unparsable_host_is_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidHost("not a host".to_string()))
        );
    }

    #[test]
    fn only_production_is_production() {
        for (environment, expected) in [
            (Environment::Development, false),
            (Environment::Staging, false),
            (Environment::Production, true),
        ] {
            let config = ServerConfig {
                environment,
                ..Default::default()
            };
            assert_eq!(config.is_production(), expected);
        }
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some(" http://localhost:5173 ,, http://rasa.local ,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "http://rasa.local"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero_port.validate(), Err(ValidationError::InvalidPort));

        for secs in [0, 301] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }

        let zero_limit = ServerConfig {
            body_limit_bytes: Some(0),
            ..Default::default()
        };
        assert_eq!(zero_limit.validate(), Err(ValidationError::InvalidBodyLimit));
    }
}
