//! Per-request lifecycle.
//!
//! ```text
//! Idle ──Send──> Sent ──Accepted──> Streaming ──End──> Completed
//!                 │                   │  ↺ Chunk
//!                 ├──Rejected──┐      │
//!                 └──Error─────┴──────┴──Error──> Failed
//! ```

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// State of one submitted message's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Idle,
    Sent,
    Streaming,
    Completed,
    Failed,
}

/// Inputs driving [`RequestState`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    /// The request was issued
    Send,
    /// The backend answered with a success status
    Accepted,
    /// The backend answered with a non-success status
    Rejected,
    /// A response chunk arrived
    Chunk,
    /// The stream signalled completion
    End,
    /// Transport, decode or cancellation failure
    Error,
}

impl RequestState {
    /// Apply `event`, rejecting transitions the lifecycle does not allow.
    pub fn transition(self, event: RequestEvent) -> Result<RequestState, DomainError> {
        use RequestEvent as E;
        use RequestState as S;

        let next = match (self, event) {
            (S::Idle, E::Send) => S::Sent,
            (S::Sent, E::Accepted) => S::Streaming,
            (S::Sent, E::Rejected) | (S::Sent, E::Error) => S::Failed,
            (S::Streaming, E::Chunk) => S::Streaming,
            (S::Streaming, E::End) => S::Completed,
            (S::Streaming, E::Error) => S::Failed,
            (from, event) => return Err(DomainError::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Completed | RequestState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Sent => "sent",
            RequestState::Streaming => "streaming",
            RequestState::Completed => "completed",
            RequestState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = RequestState::Idle
            .transition(RequestEvent::Send)
            .and_then(|s| s.transition(RequestEvent::Accepted))
            .and_then(|s| s.transition(RequestEvent::Chunk))
            .and_then(|s| s.transition(RequestEvent::Chunk))
            .and_then(|s| s.transition(RequestEvent::End))
            .unwrap();
        assert_eq!(state, RequestState::Completed);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_rejected_request_fails() {
        let state = RequestState::Sent
            .transition(RequestEvent::Rejected)
            .unwrap();
        assert_eq!(state, RequestState::Failed);
    }

    #[test]
    fn test_error_mid_stream_fails() {
        let state = RequestState::Streaming
            .transition(RequestEvent::Error)
            .unwrap();
        assert_eq!(state, RequestState::Failed);
    }

    #[test]
    fn test_chunk_before_accept_is_rejected() {
        let err = RequestState::Sent
            .transition(RequestEvent::Chunk)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for state in [RequestState::Completed, RequestState::Failed] {
            for event in [
                RequestEvent::Send,
                RequestEvent::Accepted,
                RequestEvent::Chunk,
                RequestEvent::End,
                RequestEvent::Error,
            ] {
                assert!(state.transition(event).is_err());
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestState::Streaming.to_string(), "streaming");
    }
}
