//! Chat view port
//!
//! The message list the renderer writes into. Handles are injected into
//! use cases so several in-flight requests can share one view.

use chatline_domain::Sender;

/// Identifies a bubble appended to a [`ChatView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(pub u64);

impl std::fmt::Display for BubbleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scrollable list of chat bubbles.
///
/// Bubbles are append-only; their insertion order is the display order.
pub trait ChatView: Send + Sync {
    /// Append a bubble with initial content and return its handle.
    fn append_bubble(&self, sender: Sender, content: &str) -> BubbleId;

    /// Replace the whole content of an existing bubble.
    fn replace_bubble(&self, id: BubbleId, content: &str);

    /// Move the scroll position to the newest content.
    fn scroll_to_bottom(&self);
}
