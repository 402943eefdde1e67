//! Console output for one-shot questions

use crate::view::transcript::Transcript;
use chatline_application::{BubbleId, ChatView, Notifier};
use chatline_domain::Sender;
use colored::Colorize;
use std::sync::{Mutex, MutexGuard};

/// [`ChatView`] backing one-shot mode.
///
/// Bubbles stream into an in-memory [`Transcript`]; nothing is drawn until
/// the request finishes and the final render is printed.
#[derive(Debug, Default)]
pub struct ConsoleView {
    transcript: Mutex<Transcript>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of a bubble
    pub fn content(&self, id: BubbleId) -> Option<String> {
        self.lock().get(id).map(|b| b.content.clone())
    }

    /// Print a bot bubble's rendered content to stdout.
    ///
    /// Returns `false` when the bubble is empty or unknown.
    pub fn print_bubble(&self, id: BubbleId) -> bool {
        match self.content(id) {
            Some(content) if !content.is_empty() => {
                println!("{}", content);
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ChatView for ConsoleView {
    fn append_bubble(&self, sender: Sender, content: &str) -> BubbleId {
        self.lock().append(sender, content)
    }

    fn replace_bubble(&self, id: BubbleId, content: &str) {
        self.lock().replace(id, content);
    }

    fn scroll_to_bottom(&self) {
        self.lock().scroll_to_bottom();
    }
}

/// Prints notifications to stderr
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", Self::format(message));
    }
}
