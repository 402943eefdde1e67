//! Header widget - endpoint and request activity

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (activity, color) = match self.state.in_flight {
            0 => ("Ready".to_string(), Color::Green),
            1 => ("Streaming 1 answer".to_string(), Color::Yellow),
            n => (format!("Streaming {} answers", n), Color::Yellow),
        };

        let line = Line::from(vec![
            Span::styled("◉ ", Style::default().fg(color)),
            Span::styled(
                self.state.endpoint.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(activity, Style::default().fg(color)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" chatline ")
            .style(Style::default().fg(Color::White));

        Paragraph::new(line).block(block).render(area, buf);
    }
}
