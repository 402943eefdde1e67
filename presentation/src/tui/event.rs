//! TUI event types
//!
//! Request tasks report through [`ViewUpdate`]s sent over one unbounded
//! channel, so updates and notifications reach the event loop in the order
//! they were produced.

use chatline_application::{BubbleId, ChatView, Notifier};
use chatline_domain::Sender;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::trace;

/// A change to apply to the on-screen transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    Append {
        id: BubbleId,
        sender: Sender,
        content: String,
    },
    Replace {
        id: BubbleId,
        content: String,
    },
    ScrollToBottom,
    /// Show a blocking notification
    Notify(String),
}

/// [`ChatView`] that forwards every call to the event loop.
///
/// Bubble ids are assigned here, synchronously, so callers get their handle
/// before the event loop has seen the append.
pub struct ChannelView {
    tx: mpsc::UnboundedSender<ViewUpdate>,
    next_id: AtomicU64,
}

impl ChannelView {
    pub fn new(tx: mpsc::UnboundedSender<ViewUpdate>) -> Self {
        Self {
            tx,
            next_id: AtomicU64::new(0),
        }
    }

    fn send(&self, update: ViewUpdate) {
        // The receiver is gone only once the TUI has exited
        if self.tx.send(update).is_err() {
            trace!("View update dropped after shutdown");
        }
    }
}

impl ChatView for ChannelView {
    fn append_bubble(&self, sender: Sender, content: &str) -> BubbleId {
        let id = BubbleId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.send(ViewUpdate::Append {
            id,
            sender,
            content: content.to_string(),
        });
        id
    }

    fn replace_bubble(&self, id: BubbleId, content: &str) {
        self.send(ViewUpdate::Replace {
            id,
            content: content.to_string(),
        });
    }

    fn scroll_to_bottom(&self) {
        self.send(ViewUpdate::ScrollToBottom);
    }
}

/// [`Notifier`] that raises the TUI's modal
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<ViewUpdate>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<ViewUpdate>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        if self.tx.send(ViewUpdate::Notify(message.to_string())).is_err() {
            trace!("Notification dropped after shutdown");
        }
    }
}
