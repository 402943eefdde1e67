//! Backend connection parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat endpoint of a locally running backend
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/chat";

/// Connection parameters for the chat backend.
///
/// Timeouts are opt-in. When unset the transport's own defaults apply,
/// which for streamed responses means waiting indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// URL the question is POSTed to
    pub endpoint: String,
    /// Upper bound on a whole request, including streaming the body
    pub request_timeout: Option<Duration>,
    /// Upper bound on establishing the connection
    pub connect_timeout: Option<Duration>,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            connect_timeout: None,
            user_agent: format!("chatline/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl BackendConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_backend_without_timeouts() {
        let config = BackendConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8080/chat");
        assert!(config.request_timeout.is_none());
        assert!(config.connect_timeout.is_none());
        assert!(config.user_agent.starts_with("chatline/"));
    }

    #[test]
    fn test_builder() {
        let config = BackendConfig::default()
            .with_endpoint("http://example.test/ask")
            .with_request_timeout(Some(Duration::from_secs(30)));
        assert_eq!(config.endpoint, "http://example.test/ask");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }
}
