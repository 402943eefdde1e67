//! Input widget - single-line prompt with a block cursor

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = !self.state.overlay_open();
        let color = if active { Color::Green } else { Color::DarkGray };

        let line = build_line(&self.state.input, self.state.cursor_pos, color, active);

        // Keep the cursor in view on long input
        let inner_width = area.width.saturating_sub(2) as usize;
        let cursor_col = PROMPT.len() + self.state.input[..self.state.cursor_pos].chars().count();
        let scroll_x = (cursor_col + 1).saturating_sub(inner_width);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Message ")
            .style(Style::default().fg(color));

        Paragraph::new(line)
            .block(block)
            .scroll((0, scroll_x as u16))
            .render(area, buf);
    }
}

fn build_line(text: &str, cursor_pos: usize, color: Color, active: bool) -> Line<'static> {
    let prompt = Span::styled(
        PROMPT,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    );
    if !active {
        return Line::from(vec![prompt, Span::styled(text.to_string(), Style::default().fg(color))]);
    }

    let cursor_style = Style::default().fg(Color::Black).bg(color);
    let (before, after) = text.split_at(cursor_pos);
    let mut spans = vec![prompt, Span::raw(before.to_string())];

    let mut rest = after.chars();
    match rest.next() {
        // Cursor at end of line - show block cursor on space
        None => spans.push(Span::styled(" ", cursor_style)),
        Some(ch) => {
            spans.push(Span::styled(ch.to_string(), cursor_style));
            let tail = rest.as_str();
            if !tail.is_empty() {
                spans.push(Span::raw(tail.to_string()));
            }
        }
    }
    Line::from(spans)
}
