//! Chat backend port
//!
//! Defines how the application issues a question and receives the
//! streamed answer.

use async_trait::async_trait;
use chatline_domain::{DomainError, Question};
use futures::stream::BoxStream;
use thiserror::Error;

/// Errors that can occur while talking to the chat backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The backend answered with a non-success status
    #[error("An error occurred! The server responded with {status} {reason}")]
    RequestFailed { status: u16, reason: String },

    /// Network, stream or decode failure
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The request was cancelled before it finished
    #[error("Request cancelled")]
    Cancelled,
}

impl ChatError {
    pub fn request_failed(status: u16, reason: impl Into<String>) -> Self {
        ChatError::RequestFailed {
            status,
            reason: reason.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ChatError::TransportError(message.into())
    }

    /// Whether the user should see this error. Cancellation is user-initiated.
    pub fn should_notify(&self) -> bool {
        !matches!(self, ChatError::Cancelled)
    }
}

impl From<DomainError> for ChatError {
    fn from(error: DomainError) -> Self {
        ChatError::TransportError(error.to_string())
    }
}

/// Byte chunks of a response body, in arrival order.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, ChatError>>;

/// Gateway to the chat backend
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Post `question` and return the response body as a chunk stream.
    ///
    /// Must fail with [`ChatError::RequestFailed`] on a non-success status
    /// without reading the body.
    async fn open_stream(&self, question: &Question) -> Result<ChunkStream, ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message() {
        let error = ChatError::request_failed(500, "Internal Server Error");
        assert_eq!(
            error.to_string(),
            "An error occurred! The server responded with 500 Internal Server Error"
        );
    }

    #[test]
    fn test_cancelled_is_not_notified() {
        assert!(!ChatError::Cancelled.should_notify());
        assert!(ChatError::transport("reset").should_notify());
        assert!(ChatError::request_failed(404, "Not Found").should_notify());
    }

    #[test]
    fn test_decode_error_becomes_transport_error() {
        let error: ChatError = DomainError::InvalidUtf8 { offset: 7 }.into();
        assert!(matches!(error, ChatError::TransportError(_)));
    }
}
