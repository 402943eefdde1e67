//! Application layer for chatline
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BackendConfig;
pub use ports::{
    chat_backend::{ChatBackend, ChatError, ChunkStream},
    chat_view::{BubbleId, ChatView},
    markdown::MarkdownRenderer,
    notifier::Notifier,
    progress::{NoProgress, StreamProgress},
};
pub use use_cases::chat_session::ChatSession;
pub use use_cases::send_message::{PendingRequest, SendMessageUseCase, SendOutcome};
