// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Repeating playback timer.
//!
//! A single rearm-on-fire interval timer. The controller owns at most
//! one `Ticker` at a time; dropping it cancels the timer.

use std::time::{Duration, Instant};

/// Repeating interval timer
#[derive(Debug)]
pub struct Ticker {
    /// Interval between ticks
    period: Duration,
    /// When the last tick fired (or when the timer started)
    last_tick: Instant,
}

impl Ticker {
    /// Create a ticker that first fires one `period` from now
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_tick: Instant::now(),
        }
    }

    /// Get the tick interval
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Replace the interval and rearm from now
    pub fn restart(&mut self, period: Duration) {
        self.period = period;
        self.last_tick = Instant::now();
    }

    /// Check whether a tick is due. Fires at most once per call and
    /// rearms from the moment it fires.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= self.period {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    /// Time remaining until the next tick is due
    pub fn time_until_next_tick(&self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.period {
            self.period - elapsed
        } else {
            Duration::ZERO
        }
    }
}
