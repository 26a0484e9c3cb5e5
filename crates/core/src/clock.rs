//! Delta-time clock driven by the per-frame callback.

use std::time::Instant;

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick. The first tick yields 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }
}
