//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// Only used in TUI mode, where logs cannot go to the terminal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for log files (default: platform data dir)
    pub directory: Option<String>,
}

impl FileLoggingConfig {
    /// Resolve the log directory, falling back to `<data_dir>/chatline/logs`
    pub fn log_dir(&self) -> Option<PathBuf> {
        match &self.directory {
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::data_dir().map(|d| d.join("chatline").join("logs")),
        }
    }
}
