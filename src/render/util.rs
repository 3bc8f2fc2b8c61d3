//! Render-time helpers.

use std::time::Instant;

/// A simple frame timer returning `dt` (seconds since the last `tick()`).
///
/// `tick()` clamps unreasonable `dt` (e.g. when resuming from a breakpoint or after the
/// window was hidden) so camera motion never jumps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    /// Max dt allowed from `tick()` (in seconds).
    max_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            max_dt: 0.1, // 100ms
        }
    }

    /// Advance the clock and return `dt` in seconds, clamped to `[0, max_dt]`.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        dt.clamp(0.0, self.max_dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
