// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Display widgets for the trainer UI.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph, Widget},
};

use crate::player::{DisplayState, PlayerView};

/// Transport widget: play state and tempo
pub struct TransportWidget<'a> {
    view: &'a PlayerView,
    block: Option<Block<'a>>,
}

impl<'a> TransportWidget<'a> {
    /// Create a new transport widget
    pub fn new(view: &'a PlayerView) -> Self {
        Self { view, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TransportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(10), // Play/Stop indicator
                Constraint::Length(2),  // Spacer
                Constraint::Length(12), // Line counter
                Constraint::Length(2),  // Spacer
                Constraint::Length(6),  // Tempo label
                Constraint::Min(10),    // Tempo bar
            ])
            .split(area);

        // Play/Stop indicator
        let (indicator, style) = if self.view.playing {
            (
                "▶ PLAY",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            ("■ STOP", Style::default().fg(Color::Yellow))
        };
        Paragraph::new(indicator).style(style).render(chunks[0], buf);

        // Line counter
        let counter = match &self.view.display {
            DisplayState::Line(line) => format!("{:03}/{:03}", line.number, line.total),
            DisplayState::Sentinel(_) => "---/---".to_string(),
        };
        Paragraph::new(counter)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .render(chunks[2], buf);

        // Tempo label, e.g. "2s"
        Paragraph::new(self.view.tempo_label.clone())
            .style(Style::default().fg(Color::Magenta))
            .render(chunks[4], buf);

        // Tempo slider bar over the configured range
        TempoWidget::new(
            self.view.tempo_secs,
            self.view.min_tempo_secs,
            self.view.max_tempo_secs,
        )
        .render(chunks[5], buf);
    }
}

/// Progress bar for position within the lyric set
pub struct ProgressWidget<'a> {
    view: &'a PlayerView,
    block: Option<Block<'a>>,
}

impl<'a> ProgressWidget<'a> {
    /// Create a new progress widget
    pub fn new(view: &'a PlayerView) -> Self {
        Self { view, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let (progress, counter) = match &self.view.display {
            DisplayState::Line(line) => (line.progress, line.counter.as_str()),
            DisplayState::Sentinel(_) => (0.0, "-"),
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),    // Bar
                Constraint::Length(2),  // Spacer
                Constraint::Length(16), // Counter
            ])
            .split(area);

        let width = chunks[0].width as usize;
        let filled = filled_cells(progress, width);
        let bar: String = "█".repeat(filled) + &"░".repeat(width - filled);
        Paragraph::new(bar)
            .style(Style::default().fg(Color::Green))
            .render(chunks[0], buf);

        Paragraph::new(counter.to_string())
            .style(Style::default().fg(Color::Cyan))
            .render(chunks[2], buf);
    }
}

/// Tempo slider bar over the configured range
pub struct TempoWidget {
    tempo_secs: u64,
    min_secs: u64,
    max_secs: u64,
}

impl TempoWidget {
    /// Create a new tempo widget
    pub fn new(tempo_secs: u64, min_secs: u64, max_secs: u64) -> Self {
        Self {
            tempo_secs,
            min_secs,
            max_secs,
        }
    }
}

impl Widget for TempoWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let filled = tempo_cells(self.tempo_secs, self.min_secs, self.max_secs, width);
        let bar: String = "█".repeat(filled) + &"░".repeat(width - filled);
        Paragraph::new(bar)
            .style(Style::default().fg(Color::Magenta))
            .render(area, buf);
    }
}

/// Cells to fill for a progress percentage (0-100)
fn filled_cells(progress: f64, width: usize) -> usize {
    let cells = (progress / 100.0 * width as f64).round() as usize;
    cells.min(width)
}

/// Cells to fill for a tempo position within [min, max]
fn tempo_cells(tempo: u64, min: u64, max: u64, width: usize) -> usize {
    if max <= min {
        return width;
    }
    let span = (max - min) as f64;
    let position = (tempo.clamp(min, max) - min) as f64;
    // Always show at least one cell so the minimum is visible
    (((position / span) * width as f64).round() as usize)
        .max(1)
        .min(width)
}
