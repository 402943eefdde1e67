//! Presentation layer for chatline
//!
//! This crate contains CLI definitions, the transcript view model,
//! the interactive chat TUI and one-shot console output.

pub mod cli;
pub mod output;
pub mod progress;
pub mod tui;
pub mod view;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::{ConsoleNotifier, ConsoleView};
pub use progress::reporter::SpinnerProgress;
pub use tui::TuiApp;
pub use view::transcript::{Bubble, LineKind, Transcript, TranscriptLine};
