//! TUI (Text User Interface) module for chatline
//!
//! Interactive chat built on ratatui. Request tasks never touch the
//! terminal: they write into a [`ChannelView`] whose updates the event
//! loop applies to its [`Transcript`](crate::view::transcript::Transcript).

mod app;
mod command;
mod event;
mod keys;
mod state;
mod widgets;

pub use app::TuiApp;
pub use command::SlashCommand;
pub use event::{ChannelNotifier, ChannelView, ViewUpdate};
pub use keys::{KeyAction, handle_key_event};
pub use state::TuiState;
