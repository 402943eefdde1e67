//! TUI application - main loop
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop)                 request tasks (tokio::spawn)
//!   ├─ crossterm EventStream              └─ SendMessageUseCase::stream
//!   ├─ update_rx (ViewUpdate)  <──────────────── ChannelView / ChannelNotifier
//!   └─ tick_interval
//! ```
//!
//! Only the loop owns [`TuiState`]; request tasks reach it exclusively
//! through the update channel.

use super::command::SlashCommand;
use super::event::{ChannelNotifier, ChannelView, ViewUpdate};
use super::keys::{self, DEFAULT_PAGE, KeyAction};
use super::state::TuiState;
use super::widgets::{
    MainLayout, conversation::ConversationWidget, header::HeaderWidget, input::InputWidget,
    status_bar::StatusBarWidget,
};
use chatline_application::{ChatBackend, ChatSession, ChatView, MarkdownRenderer, Notifier};
use crossterm::{
    event::{Event, EventStream, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// How long flash messages stay in the status bar
const FLASH_TTL: Duration = Duration::from_secs(5);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Main TUI application
pub struct TuiApp<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> {
    session: ChatSession<B, R>,
    update_rx: mpsc::UnboundedReceiver<ViewUpdate>,
    state: TuiState,
}

impl<B: ChatBackend + 'static, R: MarkdownRenderer + 'static> TuiApp<B, R> {
    /// Create a new TUI application; `endpoint` is only displayed.
    pub fn new(backend: Arc<B>, renderer: Arc<R>, endpoint: impl Into<String>) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel::<ViewUpdate>();
        let view: Arc<dyn ChatView> = Arc::new(ChannelView::new(update_tx.clone()));
        let notifier: Arc<dyn Notifier> = Arc::new(ChannelNotifier::new(update_tx));

        Self {
            session: ChatSession::new(backend, renderer, view, notifier),
            update_rx,
            state: TuiState::new(endpoint),
        }
    }

    /// Run the TUI main loop until the user quits
    pub async fn run(&mut self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(info);
        }));

        let result = self.event_loop(&mut terminal).await;

        self.session.cancel_all();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Term) -> io::Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_millis(250));

        self.state.transcript.scroll_to_bottom();
        self.state.set_flash("Type a message and press Enter. /help lists commands.");
        info!(endpoint = %self.state.endpoint, "TUI started");

        loop {
            self.state.in_flight = self.session.in_flight();
            terminal.draw(|frame| render(frame, &mut self.state))?;

            if self.state.should_quit {
                break;
            }

            tokio::select! {
                // Terminal events (keyboard, resize)
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    // Terminal auto-resizes on next draw
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => break,
                },

                // Updates from request tasks
                Some(update) = self.update_rx.recv() => {
                    self.state.apply(update);
                    // Drain whatever else is queued before redrawing
                    while let Ok(update) = self.update_rx.try_recv() {
                        self.state.apply(update);
                    }
                }

                // Tick for flash expiry and the in-flight counter
                _ = tick.tick() => {
                    self.state.expire_flash(FLASH_TTL);
                }
            }
        }

        info!("TUI exiting");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = keys::handle_key_event(key, self.state.overlay_open());
        self.handle_action(action);
    }

    /// Handle a semantic key action
    fn handle_action(&mut self, action: KeyAction) {
        let state = &mut self.state;
        let page = match state.transcript.viewport_height() {
            0 => DEFAULT_PAGE,
            h => h as usize,
        };

        match action {
            KeyAction::None => {}
            KeyAction::Quit => state.should_quit = true,

            KeyAction::InsertChar(c) => state.insert_char(c),
            KeyAction::DeleteChar => state.delete_char(),
            KeyAction::CursorLeft => state.cursor_left(),
            KeyAction::CursorRight => state.cursor_right(),
            KeyAction::CursorHome => state.cursor_home(),
            KeyAction::CursorEnd => state.cursor_end(),

            KeyAction::ScrollUp => state.transcript.scroll_up(1),
            KeyAction::ScrollDown => state.transcript.scroll_down(1),
            KeyAction::PageUp => state.transcript.scroll_up(page),
            KeyAction::PageDown => state.transcript.scroll_down(page),
            KeyAction::ScrollBottom => state.transcript.scroll_to_bottom(),

            KeyAction::Cancel => {
                if state.dismiss_overlay() {
                    return;
                }
                let in_flight = self.session.in_flight();
                if in_flight > 0 {
                    self.session.cancel_all();
                    debug!(in_flight, "Cancelled in-flight requests");
                    state.set_flash(format!("Cancelled {} request(s)", in_flight));
                }
            }

            KeyAction::Submit => {
                if state.dismiss_overlay() {
                    return;
                }
                let input = state.take_input();
                match SlashCommand::parse(&input) {
                    Some(command) => self.handle_command(command),
                    None => {
                        // Empty input creates no bubbles and sends nothing.
                        // The task is detached; its outcome arrives as view updates.
                        if self.session.submit(&input).is_some() {
                            debug!(in_flight = self.session.in_flight(), "Request submitted");
                        }
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, command: SlashCommand) {
        debug!(?command, "Slash command");
        match command {
            SlashCommand::Clear => {
                self.state.transcript.clear();
                self.state.set_flash("Conversation cleared");
            }
            SlashCommand::Help => self.state.show_help = true,
            SlashCommand::Quit => self.state.should_quit = true,
            SlashCommand::Unknown(name) => {
                self.state.set_flash(format!("Unknown command: /{}", name));
            }
        }
    }
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Render all widgets
fn render(frame: &mut Frame, state: &mut TuiState) {
    let layout = MainLayout::compute(frame.area());

    let (width, height) = ConversationWidget::inner_size(layout.conversation);
    state.transcript.set_viewport(width, height);

    frame.render_widget(HeaderWidget::new(state), layout.header);
    frame.render_widget(ConversationWidget::new(state), layout.conversation);
    frame.render_widget(InputWidget::new(state), layout.input);
    frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

    if state.show_help {
        let help_area = MainLayout::centered_overlay(60, 60, frame.area());
        frame.render_widget(Clear, help_area);
        render_help(frame, help_area);
    }

    // Notifications sit above help
    if let Some(message) = &state.notification {
        let modal_area = MainLayout::centered_overlay(60, 30, frame.area());
        frame.render_widget(Clear, modal_area);
        render_notification(frame, modal_area, message);
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Enter      Send message"),
        Line::from("  Esc        Cancel answers still streaming"),
        Line::from("  PgUp/PgDn  Scroll conversation"),
        Line::from("  Up/Down    Scroll one line"),
        Line::from("  Ctrl+End   Jump to newest"),
        Line::from("  Ctrl+C     Quit"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  /clear     Clear the conversation"),
        Line::from("  /help      Show this help"),
        Line::from("  /quit      Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_notification(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Error ")
        .style(Style::default().fg(Color::Red));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
