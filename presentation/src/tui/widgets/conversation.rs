//! Conversation widget - the visible slice of the transcript

use crate::tui::state::TuiState;
use crate::view::transcript::LineKind;
use chatline_domain::Sender;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ConversationWidget<'a> {
    state: &'a TuiState,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    /// Text area inside the borders, as (width, height)
    pub fn inner_size(area: Rect) -> (u16, u16) {
        (area.width.saturating_sub(2), area.height.saturating_sub(2))
    }

    fn sender_color(sender: Sender) -> Color {
        match sender {
            Sender::User => Color::Cyan,
            Sender::Bot => Color::Green,
        }
    }
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let transcript = &self.state.transcript;

        // The transcript wraps lines itself, so no Paragraph wrapping here
        let lines: Vec<Line> = transcript
            .visible_lines()
            .into_iter()
            .map(|line| match line.kind {
                LineKind::Header(sender) => Line::from(Span::styled(
                    line.text,
                    Style::default()
                        .fg(Self::sender_color(sender))
                        .add_modifier(Modifier::BOLD),
                )),
                LineKind::Body(_) | LineKind::Separator => Line::from(line.text),
            })
            .collect();

        let title = if transcript.is_at_bottom() {
            " Conversation ".to_string()
        } else {
            format!(
                " Conversation [{}/{}] ",
                transcript.scroll_offset(),
                transcript.max_scroll()
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::White));

        Paragraph::new(Text::from(lines)).block(block).render(area, buf);
    }
}
