//! Backend configuration from TOML (`[backend]` section)

use super::ConfigValidationError;
use chatline_application::{BackendConfig, config::DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// URL questions are POSTed to
    pub endpoint: String,
    /// Whole-request timeout in seconds (unset: no timeout)
    pub request_timeout_secs: Option<u64>,
    /// Connect timeout in seconds (unset: transport default)
    pub connect_timeout_secs: Option<u64>,
    /// Override for the `User-Agent` header
    pub user_agent: Option<String>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: None,
        }
    }
}

impl FileBackendConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }
        match reqwest::Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigValidationError::InvalidEndpoint(self.endpoint.clone())),
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout("request_timeout_secs"));
        }
        if self.connect_timeout_secs == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout("connect_timeout_secs"));
        }
        Ok(())
    }

    /// Convert to the application-level [`BackendConfig`]
    pub fn to_backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::default()
            .with_endpoint(self.endpoint.trim())
            .with_request_timeout(self.request_timeout_secs.map(Duration::from_secs))
            .with_connect_timeout(self.connect_timeout_secs.map(Duration::from_secs));
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_backend_config() {
        let file = FileBackendConfig {
            endpoint: " http://10.0.0.2:8080/chat ".to_string(),
            request_timeout_secs: Some(90),
            connect_timeout_secs: None,
            user_agent: Some("solar-kiosk/1.0".to_string()),
        };
        let config = file.to_backend_config();
        assert_eq!(config.endpoint, "http://10.0.0.2:8080/chat");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
        assert!(config.connect_timeout.is_none());
        assert_eq!(config.user_agent, "solar-kiosk/1.0");
    }

    #[test]
    fn test_validate_endpoint() {
        let mut file = FileBackendConfig::default();
        file.endpoint = "  ".to_string();
        assert_eq!(file.validate(), Err(ConfigValidationError::EmptyEndpoint));

        file.endpoint = "ftp://example.com/chat".to_string();
        assert!(matches!(
            file.validate(),
            Err(ConfigValidationError::InvalidEndpoint(_))
        ));

        file.endpoint = "localhost:8080/chat".to_string();
        assert!(file.validate().is_err());
    }
}
