//! Send Message use case.
//!
//! Posts one question to the backend and renders the streamed reply into
//! the view as it arrives.
//!
//! Every chunk is decoded, appended to the turn's response buffer, and the
//! *whole* buffer is re-rendered through the [`MarkdownRenderer`]. The bot
//! bubble's content is then replaced, never appended to, because Markdown
//! constructs (emphasis, code fences, lists) can span chunk boundaries.

use crate::ports::chat_backend::{ChatBackend, ChatError};
use crate::ports::chat_view::{BubbleId, ChatView};
use crate::ports::markdown::MarkdownRenderer;
use crate::ports::progress::{NoProgress, StreamProgress};
use chatline_domain::{
    ConversationTurn, Question, RequestEvent, Sender, Utf8StreamDecoder, preview,
};
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Maximum characters of the question shown in log lines
const LOG_PREVIEW_CHARS: usize = 60;

/// Result of [`SendMessageUseCase::execute`]
#[derive(Debug)]
pub enum SendOutcome {
    /// Input was empty; nothing was sent and no bubbles were created
    Skipped,
    /// The response streamed to completion
    Completed(ConversationTurn),
}

/// A validated submission whose bubbles are already in the view.
#[derive(Debug)]
pub struct PendingRequest {
    turn: ConversationTurn,
    bot_bubble: BubbleId,
}

impl PendingRequest {
    pub fn question(&self) -> &Question {
        self.turn.question()
    }

    pub fn bot_bubble(&self) -> BubbleId {
        self.bot_bubble
    }
}

/// Use case for sending a message and rendering the streamed reply.
pub struct SendMessageUseCase<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> {
    backend: Arc<B>,
    renderer: Arc<R>,
}

impl<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> SendMessageUseCase<B, R> {
    pub fn new(backend: Arc<B>, renderer: Arc<R>) -> Self {
        Self { backend, renderer }
    }

    /// Validate `text` and append the user and (empty) bot bubbles.
    ///
    /// Returns `None` for empty input, in which case the view is untouched.
    pub fn begin(&self, text: &str, view: &dyn ChatView) -> Option<PendingRequest> {
        let question = Question::try_new(text)?;

        view.append_bubble(Sender::User, question.content());
        let bot_bubble = view.append_bubble(Sender::Bot, "");
        view.scroll_to_bottom();

        Some(PendingRequest {
            turn: ConversationTurn::new(question),
            bot_bubble,
        })
    }

    /// Validate, send and stream in one call.
    pub async fn execute(
        &self,
        text: &str,
        view: &dyn ChatView,
        cancel: &CancellationToken,
    ) -> Result<SendOutcome, ChatError> {
        self.execute_with_progress(text, view, cancel, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        text: &str,
        view: &dyn ChatView,
        cancel: &CancellationToken,
        progress: &dyn StreamProgress,
    ) -> Result<SendOutcome, ChatError> {
        let Some(pending) = self.begin(text, view) else {
            debug!("Ignoring empty input");
            return Ok(SendOutcome::Skipped);
        };
        self.stream_with_progress(pending, view, cancel, progress)
            .await
            .map(SendOutcome::Completed)
    }

    /// Issue the request for `pending` and render the reply into its bubble.
    pub async fn stream(
        &self,
        pending: PendingRequest,
        view: &dyn ChatView,
        cancel: &CancellationToken,
    ) -> Result<ConversationTurn, ChatError> {
        self.stream_with_progress(pending, view, cancel, &NoProgress)
            .await
    }

    pub async fn stream_with_progress(
        &self,
        pending: PendingRequest,
        view: &dyn ChatView,
        cancel: &CancellationToken,
        progress: &dyn StreamProgress,
    ) -> Result<ConversationTurn, ChatError> {
        let PendingRequest {
            mut turn,
            bot_bubble,
        } = pending;

        turn.apply(RequestEvent::Send)?;
        info!(
            bubble = %bot_bubble,
            question = %preview(turn.question().content(), LOG_PREVIEW_CHARS),
            "Sending question"
        );
        progress.on_request_sent();

        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ChatError::Cancelled),
            result = self.backend.open_stream(turn.question()) => result,
        };

        let mut chunks = match opened {
            Ok(chunks) => {
                turn.apply(RequestEvent::Accepted)?;
                chunks
            }
            Err(error) => {
                let event = match error {
                    ChatError::RequestFailed { .. } => RequestEvent::Rejected,
                    _ => RequestEvent::Error,
                };
                turn.apply(event)?;
                return Err(Self::failed(&turn, bot_bubble, error, progress));
            }
        };

        let mut decoder = Utf8StreamDecoder::new();
        let mut received = 0usize;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => Some(Err(ChatError::Cancelled)),
                next = chunks.next() => next,
            };

            let bytes = match next {
                None => break,
                Some(Ok(bytes)) => bytes,
                Some(Err(error)) => {
                    turn.fail()?;
                    return Err(Self::failed(&turn, bot_bubble, error, progress));
                }
            };

            received += bytes.len();
            let text = match decoder.decode(&bytes) {
                Ok(text) => text,
                Err(error) => {
                    turn.fail()?;
                    return Err(Self::failed(&turn, bot_bubble, error.into(), progress));
                }
            };
            debug!(bubble = %bot_bubble, bytes = bytes.len(), total = received, "Chunk received");

            let rendered = self.renderer.render(turn.append_response(&text)?);
            view.replace_bubble(bot_bubble, &rendered);
            view.scroll_to_bottom();
            progress.on_chunk(received);
        }

        if let Err(error) = decoder.finish() {
            turn.fail()?;
            return Err(Self::failed(&turn, bot_bubble, error.into(), progress));
        }

        turn.complete()?;
        info!(bubble = %bot_bubble, bytes = received, "Response complete");
        progress.on_finished(turn.state());
        Ok(turn)
    }

    fn failed(
        turn: &ConversationTurn,
        bot_bubble: BubbleId,
        error: ChatError,
        progress: &dyn StreamProgress,
    ) -> ChatError {
        if error.should_notify() {
            warn!(
                bubble = %bot_bubble,
                kept_bytes = turn.response().len(),
                error = %error,
                "Request failed"
            );
        } else {
            debug!(bubble = %bot_bubble, "Request cancelled");
        }
        progress.on_finished(turn.state());
        error
    }
}
