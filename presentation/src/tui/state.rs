//! TUI state: transcript, input line and overlays

use super::event::ViewUpdate;
use crate::view::transcript::Transcript;
use std::time::{Duration, Instant};

pub struct TuiState {
    pub transcript: Transcript,
    pub input: String,
    /// Byte offset of the cursor within `input`
    pub cursor_pos: usize,
    /// Blocking notification awaiting dismissal
    pub notification: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    /// Requests still streaming, mirrored from the session
    pub in_flight: usize,
    /// Endpoint shown in the header
    pub endpoint: String,
    pub flash_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            cursor_pos: 0,
            notification: None,
            show_help: false,
            should_quit: false,
            in_flight: 0,
            endpoint: endpoint.into(),
            flash_message: None,
        }
    }

    /// Whether an overlay currently captures the keyboard
    pub fn overlay_open(&self) -> bool {
        self.notification.is_some() || self.show_help
    }

    /// Apply an update produced by a request task
    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Append {
                id,
                sender,
                content,
            } => self.transcript.insert(id, sender, &content),
            ViewUpdate::Replace { id, content } => {
                self.transcript.replace(id, &content);
            }
            ViewUpdate::ScrollToBottom => self.transcript.scroll_to_bottom(),
            ViewUpdate::Notify(message) => {
                // Keep the first unseen notification; later ones go to the status bar
                if self.notification.is_none() {
                    self.notification = Some(message);
                } else {
                    self.set_flash(message);
                }
            }
        }
    }

    /// Close whichever overlay is on top. Returns `false` if none was open.
    pub fn dismiss_overlay(&mut self) -> bool {
        if self.notification.take().is_some() {
            return true;
        }
        std::mem::replace(&mut self.show_help, false)
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some((message.into(), Instant::now()));
    }

    pub fn expire_flash(&mut self, ttl: Duration) {
        if let Some((_, at)) = &self.flash_message {
            if at.elapsed() >= ttl {
                self.flash_message = None;
            }
        }
    }

    // -- Input line editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if let Some(len) = self.prev_char_len() {
            self.cursor_pos -= len;
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(len) = self.prev_char_len() {
            self.cursor_pos -= len;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Take the input line contents and clear it
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    fn prev_char_len(&self) -> Option<usize> {
        self.input[..self.cursor_pos]
            .chars()
            .next_back()
            .map(char::len_utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatline_application::BubbleId;
    use chatline_domain::Sender;

    #[test]
    fn test_editing_with_multibyte_chars() {
        let mut state = TuiState::new("http://x");
        for c in "olá".chars() {
            state.insert_char(c);
        }
        assert_eq!(state.cursor_pos, 4);

        state.cursor_left();
        state.insert_char('!');
        assert_eq!(state.input, "ol!á");

        state.cursor_end();
        state.delete_char();
        assert_eq!(state.input, "ol!");

        state.cursor_home();
        state.delete_char();
        assert_eq!(state.input, "ol!");

        assert_eq!(state.take_input(), "ol!");
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_pos, 0);
    }

    #[test]
    fn test_apply_updates_keep_bottom() {
        let mut state = TuiState::new("http://x");
        state.transcript.set_viewport(30, 3);

        state.apply(ViewUpdate::Append {
            id: BubbleId(0),
            sender: Sender::User,
            content: "q".into(),
        });
        state.apply(ViewUpdate::Append {
            id: BubbleId(1),
            sender: Sender::Bot,
            content: String::new(),
        });
        state.apply(ViewUpdate::Replace {
            id: BubbleId(1),
            content: "a\nb\nc".into(),
        });
        state.apply(ViewUpdate::ScrollToBottom);

        assert_eq!(state.transcript.scroll_offset(), state.transcript.max_scroll());
        assert_eq!(state.transcript.get(BubbleId(1)).unwrap().content, "a\nb\nc");
    }

    #[test]
    fn test_notifications_queue_behind_modal() {
        let mut state = TuiState::new("http://x");
        state.apply(ViewUpdate::Notify("first".into()));
        state.apply(ViewUpdate::Notify("second".into()));

        assert_eq!(state.notification.as_deref(), Some("first"));
        assert!(state.overlay_open());
        assert_eq!(state.flash_message.as_ref().map(|(m, _)| m.as_str()), Some("second"));

        assert!(state.dismiss_overlay());
        assert!(!state.overlay_open());
        assert!(!state.dismiss_overlay());
    }

    #[test]
    fn test_notification_sits_above_help() {
        let mut state = TuiState::new("http://x");
        state.show_help = true;
        state.apply(ViewUpdate::Notify("boom".into()));

        assert!(state.dismiss_overlay());
        assert!(state.show_help);
        assert!(state.dismiss_overlay());
        assert!(!state.show_help);
    }
}
