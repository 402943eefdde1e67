//! Transcript: ordered chat bubbles plus the scroll position over them.
//!
//! The transcript lays bubbles out into display lines itself, hard-wrapping
//! at the viewport width, so the scroll math is exact regardless of which
//! surface draws the lines.

use chatline_application::BubbleId;
use chatline_domain::Sender;

/// Indent applied to bubble bodies
const BODY_INDENT: &str = "  ";

/// A single message in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub id: BubbleId,
    pub sender: Sender,
    pub content: String,
}

/// What a display line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header(Sender),
    Body(Sender),
    Separator,
}

/// One laid-out display line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
    next_id: u64,
    viewport_width: u16,
    viewport_height: u16,
    scroll_offset: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bubble and return its newly assigned id.
    pub fn append(&mut self, sender: Sender, content: &str) -> BubbleId {
        let id = BubbleId(self.next_id);
        self.insert(id, sender, content);
        id
    }

    /// Append a bubble whose id was assigned elsewhere.
    pub fn insert(&mut self, id: BubbleId, sender: Sender, content: &str) {
        self.next_id = self.next_id.max(id.0 + 1);
        self.bubbles.push(Bubble {
            id,
            sender,
            content: content.to_string(),
        });
        self.clamp_scroll();
    }

    /// Replace the content of a bubble. Returns `false` for unknown ids.
    pub fn replace(&mut self, id: BubbleId, content: &str) -> bool {
        let Some(bubble) = self.bubbles.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        bubble.content.clear();
        bubble.content.push_str(content);
        self.clamp_scroll();
        true
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Drop every bubble. Ids keep increasing so late updates for a
    /// cleared bubble are ignored.
    pub fn clear(&mut self) {
        self.bubbles.clear();
        self.scroll_offset = 0;
    }

    /// Resize the viewport. A transcript scrolled to the bottom stays there.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if (width, height) == (self.viewport_width, self.viewport_height) {
            return;
        }
        let stick = self.is_at_bottom();
        self.viewport_width = width;
        self.viewport_height = height;
        if stick {
            self.scroll_to_bottom();
        } else {
            self.clamp_scroll();
        }
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Index of the first visible line
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn total_lines(&self) -> usize {
        self.lines().len()
    }

    /// Largest offset that still fills the viewport
    pub fn max_scroll(&self) -> usize {
        self.total_lines()
            .saturating_sub(self.viewport_height as usize)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
    }

    /// Lay out every bubble: a header, the wrapped body, a blank separator.
    pub fn lines(&self) -> Vec<TranscriptLine> {
        let body_width = (self.viewport_width as usize).saturating_sub(BODY_INDENT.len());
        let mut lines = Vec::new();

        for bubble in &self.bubbles {
            lines.push(TranscriptLine {
                kind: LineKind::Header(bubble.sender),
                text: format!("{}:", bubble.sender.label()),
            });

            let before = lines.len();
            for raw in bubble.content.lines() {
                for piece in wrap(raw, body_width) {
                    lines.push(TranscriptLine {
                        kind: LineKind::Body(bubble.sender),
                        text: format!("{BODY_INDENT}{piece}"),
                    });
                }
            }
            if lines.len() == before {
                lines.push(TranscriptLine {
                    kind: LineKind::Body(bubble.sender),
                    text: BODY_INDENT.to_string(),
                });
            }

            lines.push(TranscriptLine {
                kind: LineKind::Separator,
                text: String::new(),
            });
        }

        lines
    }

    /// Lines inside the viewport at the current scroll offset
    pub fn visible_lines(&self) -> Vec<TranscriptLine> {
        self.lines()
            .into_iter()
            .skip(self.scroll_offset)
            .take(self.viewport_height as usize)
            .collect()
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

/// Hard-wrap a line at `width` characters (no wrapping when `width` is 0).
fn wrap(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
