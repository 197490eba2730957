//! Animation timer
//!
//! Per-frame accumulator that flips a blink phase at a fixed interval.

use std::time::Duration;

/// Default blink half-period in seconds
pub const BLINK_INTERVAL: f32 = 0.4;

pub struct AnimationTimer {
    interval: f32,
    since_last_tick: f32,
    /// Current blink phase
    visible: bool,
}

impl AnimationTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            since_last_tick: 0.0,
            visible: true,
        }
    }

    /// Advance by one frame. Returns true if the phase flipped.
    pub fn update(&mut self, delta: Duration) -> bool {
        let delta_secs = delta.as_secs_f32();
        self.since_last_tick += delta_secs;

        let mut flipped = false;
        while self.since_last_tick >= self.interval {
            self.since_last_tick -= self.interval;
            self.visible = !self.visible;
            flipped = !flipped;
        }
        flipped
    }

    /// Whether the blinking marker is drawn this frame
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Restart with the marker shown
    pub fn reset(&mut self) {
        self.since_last_tick = 0.0;
        self.visible = true;
    }
}

impl Default for AnimationTimer {
    fn default() -> Self {
        Self::new(BLINK_INTERVAL)
    }
}
