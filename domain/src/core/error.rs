//! Domain error types

use crate::stream::state::{RequestEvent, RequestState};
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid UTF-8 in response stream at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Response stream ended inside a multi-byte character ({pending} byte(s) pending)")]
    TruncatedUtf8 { pending: usize },

    #[error("Invalid request transition: {event:?} in state {from:?}")]
    InvalidTransition {
        from: RequestState,
        event: RequestEvent,
    },

    #[error("Conversation turn is already finished")]
    TurnFinished,
}
