//! Use cases (application services)
//!
//! - [`send_message::SendMessageUseCase`]: post one question and render the streamed reply
//! - [`chat_session::ChatSession`]: concurrent submissions sharing one view

pub mod chat_session;
pub mod send_message;
