//! Clock and timing utilities for the frame loop.
//!
//! Every interaction-core operation takes `now` as fractional seconds since
//! the kiosk started. This module provides:
//! - The frame clock that produces those timestamps
//! - Frame pacing at a target rate
//! - The frames-per-second counter shown on screen

use std::time::Instant;

/// Seconds since the frame clock epoch.
pub type Seconds = f64;

/// A monotonic clock anchored to the moment the kiosk loop started.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// The instant the loop started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Seconds elapsed since the epoch.
    pub fn now(&self) -> Seconds {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Frame rate controller for loop pacing.
#[derive(Debug)]
pub struct RateController {
    target_interval: Seconds,
    last_tick: Option<Seconds>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval: 1.0 / target_hz.max(1) as f64,
            last_tick: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now: Seconds) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                true
            }
            Some(last) if now >= last + self.target_interval => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Target interval in seconds.
    pub fn interval(&self) -> Seconds {
        self.target_interval
    }
}

/// Rolling frames-per-second measurement, refreshed once per elapsed second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    fps: f64,
    frames: u32,
    window_start: Option<Seconds>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one presented frame.
    pub fn tick(&mut self, now: Seconds) {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        let elapsed = now - start;
        if elapsed >= 1.0 {
            self.fps = self.frames as f64 / elapsed;
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    /// Last measured rate (0 until one full second has elapsed).
    pub fn fps(&self) -> f64 {
        self.fps
    }
}
