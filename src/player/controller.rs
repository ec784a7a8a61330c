// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback state machine.
//!
//! Two states, Stopped and Playing. Playing means the controller owns
//! an active [`Ticker`] whose period is the current tempo; each tick
//! advances one line with wraparound, so autoplay loops until stopped.
//! Manual navigation through [`PlayerController::step_next`] and
//! [`PlayerController::step_prev`] always interrupts autoplay first.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::Ticker;
use crate::config::PlaybackConfig;
use crate::lyrics::{LineSource, LyricSet};

/// Designated "no data" display states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// The source loaded but produced zero usable lines
    NoLyrics,
    /// The source could not be fetched
    LoadFailed,
}

impl Sentinel {
    /// User-visible message for this state
    pub fn message(&self) -> &'static str {
        match self {
            Sentinel::NoLyrics => "No lyrics found",
            Sentinel::LoadFailed => "Error loading lyrics",
        }
    }
}

/// Render payload for the current line
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    /// Line text
    pub text: String,
    /// 1-based line number
    pub number: usize,
    /// Total line count
    pub total: usize,
    /// "Line X of N" counter
    pub counter: String,
    /// Progress through the set as a percentage (0-100)
    pub progress: f64,
}

/// What the display surface should show
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    /// A lyric line with its counters
    Line(LineView),
    /// Sentinel message, navigation inert
    Sentinel(&'static str),
}

/// Full render snapshot consumed by the UI
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    /// Current display content
    pub display: DisplayState,
    /// Whether autoplay is running
    pub playing: bool,
    /// Tempo in whole seconds
    pub tempo_secs: u64,
    /// Tempo label, e.g. "2s"
    pub tempo_label: String,
    /// Lower bound of the tempo range
    pub min_tempo_secs: u64,
    /// Upper bound of the tempo range
    pub max_tempo_secs: u64,
}

/// Playback controller
#[derive(Debug)]
pub struct PlayerController {
    /// Loaded lyric set, immutable after load
    lyrics: LyricSet,
    /// Current line index, always in range while `lyrics` is non-empty
    current: usize,
    /// Tempo in whole seconds
    tempo_secs: u64,
    /// Tempo range from configuration
    min_tempo_secs: u64,
    max_tempo_secs: u64,
    /// Active timer; Some exactly while playing
    ticker: Option<Ticker>,
    /// Set when the session is in a "no data" state
    sentinel: Option<Sentinel>,
}

impl PlayerController {
    /// Fetch the source once and build the controller. Fetch failures
    /// and empty sources do not propagate; they leave the controller
    /// in a sentinel state with navigation and play inert.
    pub fn load(source: &dyn LineSource, config: &PlaybackConfig) -> Self {
        match source.fetch() {
            Ok(text) => {
                let lyrics = LyricSet::parse(&text);
                info!(lines = lyrics.len(), "lyrics loaded");
                Self::with_lyrics(lyrics, config)
            }
            Err(err) => {
                warn!(error = %err, "lyric source fetch failed");
                let mut controller = Self::with_lyrics(LyricSet::empty(), config);
                controller.sentinel = Some(Sentinel::LoadFailed);
                controller
            }
        }
    }

    /// Build a controller over an already-parsed set
    pub fn with_lyrics(lyrics: LyricSet, config: &PlaybackConfig) -> Self {
        let sentinel = if lyrics.is_empty() {
            Some(Sentinel::NoLyrics)
        } else {
            None
        };
        let min = config.min_tempo_secs.max(1);
        let max = config.max_tempo_secs.max(min);
        Self {
            lyrics,
            current: 0,
            tempo_secs: config.tempo_secs.clamp(min, max),
            min_tempo_secs: min,
            max_tempo_secs: max,
            ticker: None,
            sentinel,
        }
    }

    /// Whether autoplay is running
    pub fn is_playing(&self) -> bool {
        self.ticker.is_some()
    }

    /// Current line index
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Tempo in whole seconds
    pub fn tempo_secs(&self) -> u64 {
        self.tempo_secs
    }

    /// Tempo as a timer period
    pub fn tempo(&self) -> Duration {
        Duration::from_secs(self.tempo_secs)
    }

    /// Whether the controller is in a sentinel state
    pub fn sentinel(&self) -> Option<Sentinel> {
        self.sentinel
    }

    /// Advance one line with wraparound. No-op in a sentinel state.
    /// Does not touch the play state; autoplay keeps running.
    pub fn next_line(&mut self) {
        if self.sentinel.is_none() {
            self.current = self.lyrics.next_index(self.current);
        }
    }

    /// Retreat one line with wraparound. No-op in a sentinel state.
    pub fn prev_line(&mut self) {
        if self.sentinel.is_none() {
            self.current = self.lyrics.prev_index(self.current);
        }
    }

    /// Arrow-key forward step: honored only while stopped. During
    /// playback this is a no-op and autoplay keeps running.
    pub fn seek_next(&mut self) {
        if !self.is_playing() {
            self.next_line();
        }
    }

    /// Arrow-key backward step: honored only while stopped
    pub fn seek_prev(&mut self) {
        if !self.is_playing() {
            self.prev_line();
        }
    }

    /// Manual forward step: stops autoplay, then advances
    pub fn step_next(&mut self) {
        self.stop();
        self.next_line();
    }

    /// Manual backward step: stops autoplay, then retreats
    pub fn step_prev(&mut self) {
        self.stop();
        self.prev_line();
    }

    /// Start autoplay. No-op if already playing or in a sentinel state.
    pub fn start(&mut self) {
        if self.ticker.is_some() || self.sentinel.is_some() {
            return;
        }
        debug!(tempo_secs = self.tempo_secs, "playback started");
        self.ticker = Some(Ticker::new(self.tempo()));
    }

    /// Stop autoplay and release the timer. Idempotent.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            debug!("playback stopped");
        }
    }

    /// Toggle between Stopped and Playing
    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Set the tempo, clamped to the configured range. If playing, the
    /// timer is restarted in place so the new period applies on the
    /// next tick without leaving the Playing state.
    pub fn set_tempo_secs(&mut self, secs: u64) {
        self.tempo_secs = secs.clamp(self.min_tempo_secs, self.max_tempo_secs);
        let period = self.tempo();
        if let Some(ticker) = &mut self.ticker {
            ticker.restart(period);
        }
    }

    /// Nudge the tempo by one second in either direction
    pub fn nudge_tempo(&mut self, delta: i64) {
        let secs = self.tempo_secs.saturating_add_signed(delta);
        self.set_tempo_secs(secs.max(1));
    }

    /// Drive the active timer. Advances one line if a tick is due.
    /// Returns true when a tick fired.
    pub fn poll(&mut self) -> bool {
        let due = match &mut self.ticker {
            Some(ticker) => ticker.tick(),
            None => false,
        };
        if due {
            self.next_line();
        }
        due
    }

    /// Time until the next tick is due, for event-poll pacing.
    /// None while stopped.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.ticker.as_ref().map(Ticker::time_until_next_tick)
    }

    /// Snapshot of everything the display surface needs
    pub fn view(&self) -> PlayerView {
        let display = match self.sentinel {
            Some(sentinel) => DisplayState::Sentinel(sentinel.message()),
            None => DisplayState::Line(self.line_view()),
        };
        PlayerView {
            display,
            playing: self.is_playing(),
            tempo_secs: self.tempo_secs,
            tempo_label: format!("{}s", self.tempo_secs),
            min_tempo_secs: self.min_tempo_secs,
            max_tempo_secs: self.max_tempo_secs,
        }
    }

    fn line_view(&self) -> LineView {
        let total = self.lyrics.len();
        let number = self.current + 1;
        LineView {
            text: self
                .lyrics
                .line(self.current)
                .unwrap_or_default()
                .to_string(),
            number,
            total,
            counter: format!("Line {} of {}", number, total),
            progress: (number as f64 / total as f64) * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::LoadError;
    use std::thread;

    fn config() -> PlaybackConfig {
        PlaybackConfig::default()
    }

    fn controller(lines: &str) -> PlayerController {
        PlayerController::with_lyrics(LyricSet::parse(lines), &config())
    }

    struct FailingSource;

    impl LineSource for FailingSource {
        fn fetch(&self) -> Result<String, LoadError> {
            Err(LoadError::Io(std::io::Error::other("unreachable")))
        }
    }

    #[test]
    fn test_initial_state() {
        let c = controller("a\nb\nc\n");
        assert_eq!(c.current_index(), 0);
        assert!(!c.is_playing());
        assert_eq!(c.tempo_secs(), 2);
        assert!(c.sentinel().is_none());
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let mut c = controller("a\nb\nc\n");
        c.next_line();
        assert_eq!(c.current_index(), 1);
        c.next_line();
        assert_eq!(c.current_index(), 2);
        c.next_line();
        assert_eq!(c.current_index(), 0); // Wrap to beginning
        c.prev_line();
        assert_eq!(c.current_index(), 2); // Wrap to end
    }

    #[test]
    fn test_toggle_play_is_involution() {
        let mut c = controller("a\nb\n");
        assert!(!c.is_playing());
        c.toggle_play();
        assert!(c.is_playing());
        c.toggle_play();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut c = controller("a\nb\n");
        c.stop();
        c.stop();
        assert!(!c.is_playing());

        c.start();
        c.stop();
        c.stop();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_seek_ignored_while_playing() {
        let mut c = controller("a\nb\nc\n");
        c.start();

        c.seek_next();
        c.seek_prev();
        assert!(c.is_playing());
        assert_eq!(c.current_index(), 0);

        c.stop();
        c.seek_next();
        assert_eq!(c.current_index(), 1);
        c.seek_prev();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_step_interrupts_autoplay() {
        let mut c = controller("a\nb\nc\n");
        c.start();
        assert!(c.is_playing());
        c.step_next();
        assert!(!c.is_playing());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_set_tempo_keeps_playing() {
        let mut c = controller("a\nb\n");
        c.start();
        c.set_tempo_secs(5);
        assert!(c.is_playing());
        assert_eq!(c.tempo_secs(), 5);
        // Freshly rearmed at the new period; leave slack for stalls
        assert!(c.time_until_tick().unwrap() > Duration::from_secs(3));
    }

    #[test]
    fn test_set_tempo_clamps_to_range() {
        let mut c = controller("a\n");
        c.set_tempo_secs(0);
        assert_eq!(c.tempo_secs(), 1);
        c.set_tempo_secs(9999);
        assert_eq!(c.tempo_secs(), 10);
    }

    #[test]
    fn test_nudge_tempo() {
        let mut c = controller("a\n");
        c.nudge_tempo(1);
        assert_eq!(c.tempo_secs(), 3);
        c.nudge_tempo(-1);
        assert_eq!(c.tempo_secs(), 2);
        c.nudge_tempo(-5);
        assert_eq!(c.tempo_secs(), 1);
    }

    #[test]
    fn test_empty_set_is_sentinel_and_inert() {
        let mut c = controller("\n  \n");
        assert_eq!(c.sentinel(), Some(Sentinel::NoLyrics));

        c.next_line();
        c.prev_line();
        c.toggle_play();
        assert!(!c.is_playing());
        assert_eq!(c.current_index(), 0);

        match c.view().display {
            DisplayState::Sentinel(msg) => assert_eq!(msg, "No lyrics found"),
            other => panic!("expected sentinel, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_fetch_is_sentinel() {
        let c = PlayerController::load(&FailingSource, &config());
        assert_eq!(c.sentinel(), Some(Sentinel::LoadFailed));
        match c.view().display {
            DisplayState::Sentinel(msg) => assert_eq!(msg, "Error loading lyrics"),
            other => panic!("expected sentinel, got {:?}", other),
        }
    }

    #[test]
    fn test_view_counters_and_progress() {
        let mut c = controller("a\nb\nc\nd\n");
        c.next_line();
        let view = c.view();
        match view.display {
            DisplayState::Line(line) => {
                assert_eq!(line.text, "b");
                assert_eq!(line.number, 2);
                assert_eq!(line.total, 4);
                assert_eq!(line.counter, "Line 2 of 4");
                assert_eq!(line.progress, 50.0);
            }
            other => panic!("expected line, got {:?}", other),
        }
        assert_eq!(view.tempo_label, "2s");
    }

    #[test]
    fn test_poll_advances_on_tick() {
        let mut c = controller("a\nb\nc\n");
        c.start();
        // Swap in a fast timer so the test does not wait on the tempo
        c.ticker = Some(Ticker::new(Duration::from_millis(5)));

        let mut ticks = 0;
        let start = std::time::Instant::now();
        while ticks < 3 && start.elapsed() < Duration::from_secs(2) {
            if c.poll() {
                ticks += 1;
            }
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(ticks, 3);
        assert_eq!(c.current_index(), 0); // Advanced 3 of 3, wrapped home
        assert!(c.is_playing());
    }

    #[test]
    fn test_poll_noop_while_stopped() {
        let mut c = controller("a\nb\n");
        assert!(!c.poll());
        assert_eq!(c.current_index(), 0);
        assert!(c.time_until_tick().is_none());
    }
}
