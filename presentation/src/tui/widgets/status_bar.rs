//! Status bar widget - key hints or flash messages

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let (label, label_color) = if self.state.notification.is_some() {
            ("ALERT", Color::Red)
        } else if self.state.in_flight > 0 {
            ("BUSY", Color::Yellow)
        } else {
            ("READY", Color::Green)
        };
        let label_span = Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(Color::Black)
                .bg(label_color)
                .add_modifier(Modifier::BOLD),
        );
        let label_width = label.len() as u16 + 2;
        buf.set_line(area.x, area.y, &Line::from(label_span), label_width);

        let right_text = if let Some((flash, _)) = &self.state.flash_message {
            flash.clone()
        } else if self.state.overlay_open() {
            "Enter/Esc:dismiss  Ctrl+C:quit".to_string()
        } else {
            "Enter:send  Esc:cancel  PgUp/PgDn:scroll  /help  Ctrl+C:quit".to_string()
        };

        let right_width = right_text.chars().count() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        if right_x > area.x + label_width {
            let right_line = Line::from(Span::styled(
                right_text,
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            buf.set_line(right_x, area.y, &right_line, right_width + 1);
        }
    }
}
