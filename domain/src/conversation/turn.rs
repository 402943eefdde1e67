//! Conversation turn entity

use super::buffer::ResponseBuffer;
use crate::core::error::DomainError;
use crate::core::question::Question;
use crate::stream::state::{RequestEvent, RequestState};

/// One exchange: the user's question and the streamed response (Entity).
///
/// The response only grows while the request is streaming and is frozen
/// once the turn reaches a terminal state.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    question: Question,
    response: ResponseBuffer,
    state: RequestState,
}

impl ConversationTurn {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            response: ResponseBuffer::new(),
            state: RequestState::Idle,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn response(&self) -> &str {
        self.response.as_str()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Drive the lifecycle without touching the response.
    pub fn apply(&mut self, event: RequestEvent) -> Result<RequestState, DomainError> {
        if self.state.is_terminal() {
            return Err(DomainError::TurnFinished);
        }
        self.state = self.state.transition(event)?;
        Ok(self.state)
    }

    /// Append decoded text and return the whole response so far.
    pub fn append_response(&mut self, text: &str) -> Result<&str, DomainError> {
        self.apply(RequestEvent::Chunk)?;
        self.response.push_str(text);
        Ok(self.response.as_str())
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.apply(RequestEvent::End).map(|_| ())
    }

    /// Mark the turn failed. The partial response is kept.
    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.apply(RequestEvent::Error).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streaming_turn() -> ConversationTurn {
        let mut turn = ConversationTurn::new(Question::try_new("hi").unwrap());
        turn.apply(RequestEvent::Send).unwrap();
        turn.apply(RequestEvent::Accepted).unwrap();
        turn
    }

    #[test]
    fn test_new_turn_is_idle_and_empty() {
        let turn = ConversationTurn::new(Question::try_new("hi").unwrap());
        assert_eq!(turn.state(), RequestState::Idle);
        assert_eq!(turn.response(), "");
        assert_eq!(turn.question().content(), "hi");
    }

    #[test]
    fn test_append_returns_accumulated_text() {
        let mut turn = streaming_turn();
        assert_eq!(turn.append_response("Hel").unwrap(), "Hel");
        assert_eq!(turn.append_response("lo").unwrap(), "Hello");
        turn.complete().unwrap();
        assert_eq!(turn.state(), RequestState::Completed);
    }

    #[test]
    fn test_no_mutation_after_completion() {
        let mut turn = streaming_turn();
        turn.append_response("done").unwrap();
        turn.complete().unwrap();
        assert_eq!(turn.append_response("more"), Err(DomainError::TurnFinished));
        assert_eq!(turn.response(), "done");
    }

    #[test]
    fn test_failure_keeps_partial_response() {
        let mut turn = streaming_turn();
        turn.append_response("partial").unwrap();
        turn.fail().unwrap();
        assert!(turn.is_finished());
        assert_eq!(turn.response(), "partial");
    }

    #[test]
    fn test_append_before_accept_is_rejected() {
        let mut turn = ConversationTurn::new(Question::try_new("hi").unwrap());
        turn.apply(RequestEvent::Send).unwrap();
        assert!(turn.append_response("x").is_err());
        assert_eq!(turn.response(), "");
    }
}
