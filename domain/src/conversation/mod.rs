//! Conversation domain.
//!
//! - [`turn::ConversationTurn`]: one (question, response) exchange
//! - [`buffer::ResponseBuffer`]: append-only response text of a request
//! - [`sender::Sender`]: who a bubble belongs to

pub mod buffer;
pub mod sender;
pub mod turn;
