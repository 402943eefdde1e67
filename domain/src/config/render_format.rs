//! Render format value object

use serde::{Deserialize, Serialize};

/// How response Markdown is turned into displayable text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Terminal layout with ANSI styling (default)
    #[default]
    Terminal,
    /// Terminal layout without escape codes
    Plain,
    /// HTML markup, as a browser would receive it
    Html,
    /// The Markdown source unchanged
    Raw,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Terminal => "terminal",
            RenderFormat::Plain => "plain",
            RenderFormat::Html => "html",
            RenderFormat::Raw => "raw",
        }
    }
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" | "term" => Ok(RenderFormat::Terminal),
            "plain" | "text" => Ok(RenderFormat::Plain),
            "html" => Ok(RenderFormat::Html),
            "raw" | "markdown" | "md" => Ok(RenderFormat::Raw),
            other => Err(format!("unknown render format '{other}'")),
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
