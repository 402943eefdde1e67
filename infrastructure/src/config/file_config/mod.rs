//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod logging;
mod output;

pub use backend::FileBackendConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("backend.endpoint '{0}' is not an http(s) URL")]
    InvalidEndpoint(String),

    #[error("backend.{0} cannot be 0")]
    InvalidTimeout(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat backend connection
    pub backend: FileBackendConfig,
    /// Rendering settings
    pub output: FileOutputConfig,
    /// Log file settings (TUI mode)
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.backend.validate()
    }
}
