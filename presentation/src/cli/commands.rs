//! CLI command definitions

use chatline_domain::RenderFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the one-shot answer is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Markdown rendered with ANSI styling
    Terminal,
    /// Markdown rendered as plain text
    Plain,
    /// Markdown rendered as HTML
    Html,
    /// The Markdown source as received
    Raw,
}

impl From<FormatArg> for RenderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Terminal => RenderFormat::Terminal,
            FormatArg::Plain => RenderFormat::Plain,
            FormatArg::Html => RenderFormat::Html,
            FormatArg::Raw => RenderFormat::Raw,
        }
    }
}

/// CLI arguments for chatline
#[derive(Parser, Debug)]
#[command(name = "chatline")]
#[command(author, version, about = "Terminal chat client for streaming Markdown answers")]
#[command(long_about = r#"
chatline posts your question to a chat backend and renders the streamed
Markdown answer as it arrives.

Without a question an interactive chat opens. Type a message and press
Enter; Esc cancels answers still streaming; /help lists commands.

Configuration files are loaded from (in priority order):
1. CHATLINE_* environment variables
2. --config <path>     Explicit config file
3. ./chatline.toml     Project-level config
4. ~/.config/chatline/config.toml   Global config

Example:
  chatline "How does the battery charge at night?"
  chatline --format html "Summarise today's production"
  chatline --endpoint http://10.0.0.2:8080/chat
"#)]
pub struct Cli {
    /// Ask a single question and print the answer (interactive chat otherwise)
    pub question: Option<String>,

    /// Chat endpoint URL (overrides config)
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Output format for one-shot answers (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Whole-request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show the effective configuration and its sources, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// One-shot mode when a question was given
    pub fn is_one_shot(&self) -> bool {
        self.question.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_opens_chat() {
        let cli = Cli::try_parse_from(["chatline"]).unwrap();
        assert!(!cli.is_one_shot());
        assert_eq!(cli.verbose, 0);
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_one_shot_with_overrides() {
        let cli = Cli::try_parse_from([
            "chatline",
            "-vv",
            "--format",
            "html",
            "--endpoint",
            "http://10.0.0.2:8080/chat",
            "--timeout",
            "30",
            "Qual a geração de hoje?",
        ])
        .unwrap();

        assert!(cli.is_one_shot());
        assert_eq!(cli.question.as_deref(), Some("Qual a geração de hoje?"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format.map(RenderFormat::from), Some(RenderFormat::Html));
        assert_eq!(cli.endpoint.as_deref(), Some("http://10.0.0.2:8080/chat"));
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["chatline", "--format", "sepia", "hi"]).is_err());
    }
}
