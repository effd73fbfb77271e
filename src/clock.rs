//! Playback position sources.

use std::time::{Duration, Instant};

/// Supplies the current media position in seconds.
pub trait Clock {
    fn current_time(&self) -> f64;
}

/// A media position driven by the wall clock. It advances at `rate` while
/// playing and stands still while paused. Seeks may go in either direction.
#[derive(Debug, Clone)]
pub struct MediaClock {
    /// Position at `anchor`, or the frozen position while paused.
    position: f64,
    anchor: Option<Instant>,
    rate: f64,
}

impl MediaClock {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            anchor: None,
            rate: 1.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn seek(&mut self, position: f64) {
        self.seek_at(position, Instant::now());
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.set_rate_at(rate, Instant::now());
    }

    pub fn play_at(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    pub fn pause_at(&mut self, now: Instant) {
        self.position = self.time_at(now);
        self.anchor = None;
    }

    pub fn seek_at(&mut self, position: f64, now: Instant) {
        self.position = position.max(0.0);
        if self.anchor.is_some() {
            self.anchor = Some(now);
        }
    }

    pub fn set_rate_at(&mut self, rate: f64, now: Instant) {
        self.position = self.time_at(now);
        if self.anchor.is_some() {
            self.anchor = Some(now);
        }
        self.rate = rate;
    }

    pub fn time_at(&self, now: Instant) -> f64 {
        match self.anchor {
            Some(anchor) => {
                let elapsed = now.saturating_duration_since(anchor);
                self.position + elapsed.as_secs_f64() * self.rate
            }
            None => self.position,
        }
    }
}

impl Default for MediaClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MediaClock {
    fn current_time(&self) -> f64 {
        self.time_at(Instant::now())
    }
}

/// How long to wait before the next tick, given the configured interval.
pub fn frame_interval(tick_interval_ms: u64) -> Duration {
    Duration::from_millis(tick_interval_ms.max(1))
}
