//! Core configuration for stepviz-replay-core.

use serde::{Deserialize, Serialize};

/// Engine tuning knobs. Keep this minimal; expand without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base delay between playback ticks in milliseconds, before the speed
    /// divisor is applied.
    pub base_interval_ms: u32,
    /// Ring capacity assumed for circular buffers when neither meta nor the
    /// steps report one.
    pub default_capacity: usize,
    /// Seconds between derived freeform script lines when the plan carries no
    /// explicit timing.
    pub freeform_line_seconds: f32,
}

impl Config {
    /// Tick interval in seconds at the given speed. Speed is clamped to a
    /// small positive floor so a zero/negative input can never stall a tick
    /// forever.
    pub fn tick_interval(&self, speed: f32) -> f32 {
        let speed = if speed.is_finite() { speed.max(0.05) } else { 1.0 };
        (self.base_interval_ms as f32 / 1000.0) / speed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_interval_ms: 2000,
            default_capacity: 5,
            freeform_line_seconds: 2.0,
        }
    }
}
