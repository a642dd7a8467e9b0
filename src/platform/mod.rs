//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame timing (clamped deltas)
//! - Browser bindings (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::MAX_FRAME_DT;

/// Turns host timestamps into clamped frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Seconds since the previous call, clamped to `max_dt`
    ///
    /// The first call yields zero. Callers that skip simulation (pause) still
    /// call this so the skipped time is discarded instead of banked.
    pub fn advance(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) if now_secs > last => (now_secs - last) as f32,
            _ => 0.0,
        };
        self.last = Some(now_secs);
        dt.min(self.max_dt)
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last = None;
    }
}
