//! Domain layer for chatline
//!
//! This crate contains the core entities and value objects of the chat
//! client. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversation turn**: a question and the response streamed back for it
//! - **Response buffer**: append-only text, re-rendered in full on every chunk
//! - **Request state**: `Idle → Sent → Streaming → {Completed | Failed}`

pub mod config;
pub mod conversation;
pub mod core;
pub mod stream;

// Re-export commonly used types
pub use config::RenderFormat;
pub use conversation::{buffer::ResponseBuffer, sender::Sender, turn::ConversationTurn};
pub use self::core::{error::DomainError, question::Question, string::preview};
pub use stream::{
    decoder::Utf8StreamDecoder,
    state::{RequestEvent, RequestState},
};
