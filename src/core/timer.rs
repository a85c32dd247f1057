/// Redraw timing: a delta clock for the event loop and a throttle that
/// bounds how often a dirty view gets re-rendered.
use std::time::Instant;

/// Wall clock that hands out the time since the previous tick
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Seconds since the last tick; advances the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum spacing between renders
#[derive(Debug, Clone, Copy)]
pub struct RedrawThrottle {
    min_interval: f32,
    time_since_last: f32,
}

impl RedrawThrottle {
    /// Throttle to at most `max_fps` renders per second; 0 means unlimited
    pub fn from_fps(max_fps: f32) -> Self {
        let min_interval = if max_fps > 0.0 { 1.0 / max_fps } else { 0.0 };
        Self {
            min_interval,
            // First render is never held back
            time_since_last: min_interval,
        }
    }

    pub fn min_interval(&self) -> f32 {
        self.min_interval
    }

    /// Accumulate elapsed time
    pub fn advance(&mut self, delta: f32) {
        self.time_since_last += delta.max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.time_since_last >= self.min_interval
    }

    /// Seconds left before the next render is allowed
    pub fn remaining(&self) -> f32 {
        (self.min_interval - self.time_since_last).max(0.0)
    }

    /// Record that a render just happened
    pub fn mark_rendered(&mut self) {
        self.time_since_last = 0.0;
    }
}
