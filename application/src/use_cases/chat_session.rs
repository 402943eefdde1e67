//! Chat session - concurrent submissions against one shared view.
//!
//! Each [`ChatSession::submit`] validates the input and appends both bubbles
//! synchronously, then spawns a task that streams the reply. Bubble order in
//! the view therefore always matches submission order, while any number of
//! replies may stream at the same time, each into its own bubble.
//!
//! Failures of every task are routed to the single [`Notifier`].

use crate::ports::chat_backend::{ChatBackend, ChatError};
use crate::ports::chat_view::ChatView;
use crate::ports::markdown::MarkdownRenderer;
use crate::ports::notifier::Notifier;
use crate::use_cases::send_message::SendMessageUseCase;
use chatline_domain::ConversationTurn;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Interactive chat session.
pub struct ChatSession<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> {
    use_case: Arc<SendMessageUseCase<B, R>>,
    view: Arc<dyn ChatView>,
    notifier: Arc<dyn Notifier>,
    /// Parent of every in-flight request's token; swapped on `cancel_all`
    cancel: Mutex<CancellationToken>,
    in_flight: Arc<AtomicUsize>,
}

impl<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> ChatSession<B, R> {
    pub fn new(
        backend: Arc<B>,
        renderer: Arc<R>,
        view: Arc<dyn ChatView>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            use_case: Arc::new(SendMessageUseCase::new(backend, renderer)),
            view,
            notifier,
            cancel: Mutex::new(CancellationToken::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Submit user input.
    ///
    /// Returns `None` without touching the view for empty input. Otherwise
    /// returns the handle of the spawned streaming task. Must be called
    /// within a tokio runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<Result<ConversationTurn, ChatError>>> {
        let pending = self.use_case.begin(text, self.view.as_ref())?;
        let token = self.current_token().child_token();

        let use_case = Arc::clone(&self.use_case);
        let view = Arc::clone(&self.view);
        let notifier = Arc::clone(&self.notifier);
        let in_flight = InFlightGuard::enter(Arc::clone(&self.in_flight));

        debug!(bubble = %pending.bot_bubble(), "Spawning request task");
        Some(tokio::spawn(async move {
            let _in_flight = in_flight;
            let result = use_case.stream(pending, view.as_ref(), &token).await;
            if let Err(error) = &result {
                if error.should_notify() {
                    notifier.notify(&error.to_string());
                }
            }
            result
        }))
    }

    /// Number of requests still streaming.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Cancel every in-flight request. Later submissions are unaffected.
    pub fn cancel_all(&self) {
        let previous = {
            let mut guard = self.cancel.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *guard, CancellationToken::new())
        };
        previous.cancel();
    }

    fn current_token(&self) -> CancellationToken {
        self.cancel
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> Drop for ChatSession<B, R> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Counts one request task as in flight until dropped, even when the task
/// panics or is aborted.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
