//! Slash commands typed into the input line

/// A command recognised in the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl SlashCommand {
    /// Parse `input` as a command. Returns `None` for ordinary messages.
    pub fn parse(input: &str) -> Option<Self> {
        let rest = input.trim().strip_prefix('/')?;
        let name = rest.split_whitespace().next().unwrap_or_default();
        Some(match name {
            "clear" | "cls" => SlashCommand::Clear,
            "help" | "h" | "?" => SlashCommand::Help,
            "quit" | "q" | "exit" => SlashCommand::Quit,
            other => SlashCommand::Unknown(other.to_string()),
        })
    }
}
