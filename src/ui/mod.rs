// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the lyric trainer.
//!
//! Provides a ratatui-based interface with the current lyric line,
//! a progress bar, and a transport strip with play state and tempo.

mod widgets;

pub use widgets::{ProgressWidget, TempoWidget, TransportWidget};

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::player::{DisplayState, PlayerView};

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Toggle play/pause
    TogglePlay,
    /// Next-button press: interrupts autoplay, then steps forward
    NextLine,
    /// Prev-button press: interrupts autoplay, then steps back
    PrevLine,
    /// Arrow navigation forward, honored only while stopped
    SeekForward,
    /// Arrow navigation back, honored only while stopped
    SeekBack,
    /// Slow the tempo by one second
    TempoUp,
    /// Speed the tempo by one second
    TempoDown,
    /// Toggle the help overlay
    ToggleHelp,
}

/// Terminal UI application
pub struct App {
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
    /// Help overlay visible
    show_help: bool,
}

impl App {
    /// Create the app and take over the terminal
    pub fn new(frame_rate: u32) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            frame_rate: frame_rate.clamp(1, 120),
            running: true,
            show_help: false,
        })
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Handle a key event
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        match (code, modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.quit();
                KeyAction::Quit
            }

            // Transport
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::TogglePlay,

            // Step buttons
            (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::NextLine,
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::PrevLine,

            // Arrow navigation
            (KeyCode::Right, KeyModifiers::NONE) => KeyAction::SeekForward,
            (KeyCode::Left, KeyModifiers::NONE) => KeyAction::SeekBack,

            // Tempo
            (KeyCode::Up, KeyModifiers::NONE) => KeyAction::TempoUp,
            (KeyCode::Down, KeyModifiers::NONE) => KeyAction::TempoDown,

            // Help
            (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                self.show_help = !self.show_help;
                KeyAction::ToggleHelp
            }

            _ => KeyAction::None,
        }
    }

    /// Poll for events. The timeout is the frame period, shortened by
    /// the playback deadline so ticks are not left waiting on input.
    pub fn poll_event(&self, until_tick: Option<Duration>) -> io::Result<Option<Event>> {
        let frame = Duration::from_millis(1000 / self.frame_rate as u64);
        let timeout = match until_tick {
            Some(deadline) => frame.min(deadline),
            None => frame,
        };
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Whether a key event is a press (ignores repeats and releases)
    pub fn is_press(event: &Event) -> bool {
        matches!(
            event,
            Event::Key(key) if key.kind == KeyEventKind::Press
        )
    }

    /// Draw the UI from a player snapshot
    pub fn draw(&mut self, view: &PlayerView) -> io::Result<()> {
        let show_help = self.show_help;

        self.terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: transport, line, progress, status bar
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Transport
                    Constraint::Min(5),    // Current line
                    Constraint::Length(3), // Progress
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            frame.render_widget(
                TransportWidget::new(view)
                    .block(Block::default().borders(Borders::ALL).title(" Transport ")),
                chunks[0],
            );

            render_line(frame, chunks[1], view);

            frame.render_widget(
                ProgressWidget::new(view)
                    .block(Block::default().borders(Borders::ALL).title(" Progress ")),
                chunks[2],
            );

            render_status_bar(frame, chunks[3]);

            if show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the current lyric line (or the sentinel message)
fn render_line(frame: &mut Frame, area: Rect, view: &PlayerView) {
    let block = Block::default().borders(Borders::ALL).title(" Lyrics ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (text, style) = match &view.display {
        DisplayState::Line(line) => (
            line.text.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        DisplayState::Sentinel(message) => {
            (message.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    // Center the line vertically in the panel
    let pad = inner.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::from(""); pad as usize];
    lines.push(Line::from(Span::styled(text, style)));

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, inner);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect) {
    let text = Span::styled(
        " Space: Play/Pause | n/p: Next/Prev | Left/Right: Seek | Up/Down: Tempo | h: Help | q: Quit",
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 44.min(area.width.saturating_sub(4));
    let height = 13.min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    // Clear background
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        help_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Transport",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Space       Play/Pause"),
        Line::from("  Up/Down     Tempo +/- 1s"),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  n/p         Next/Prev (stops autoplay)"),
        Line::from("  Right/Left  Step (while stopped)"),
        Line::from(""),
        Line::from(Span::styled(
            "Other",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  h/?         Toggle help"),
        Line::from("  q/Ctrl+c    Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    // App construction needs a real terminal, so tests stay on the
    // pure pieces.

    #[test]
    fn test_key_action_variants_distinct() {
        assert_ne!(KeyAction::NextLine, KeyAction::SeekForward);
        assert_ne!(KeyAction::PrevLine, KeyAction::SeekBack);
    }

    #[test]
    fn test_is_press_ignores_release() {
        use crossterm::event::{KeyEvent, KeyEventState};

        let press = Event::Key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert!(App::is_press(&press));

        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('n'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!App::is_press(&release));
    }
}
