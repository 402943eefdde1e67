//! Output configuration from TOML (`[output]` section)

use chatline_domain::RenderFormat;
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// How responses are rendered in one-shot mode
    pub format: RenderFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::Terminal,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Effective format once the color switch is applied
    pub fn effective_format(&self) -> RenderFormat {
        match self.format {
            RenderFormat::Terminal if !self.color => RenderFormat::Plain,
            other => other,
        }
    }
}
