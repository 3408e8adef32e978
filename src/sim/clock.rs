//! Run clock: elapsed time and forward world distance

use serde::{Deserialize, Serialize};

/// Converts elapsed frame time into forward distance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    /// Seconds since run start
    pub elapsed_secs: f32,
    /// Total forward distance covered since run start
    pub distance_traveled: f32,
    /// Distance covered by the most recent frame
    pub frame_delta: f32,
    /// Frames stepped since run start
    pub frame_count: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds at `speed` units/sec; returns the distance covered
    pub fn advance(&mut self, dt: f32, speed: f32) -> f32 {
        let dt = dt.max(0.0);
        self.elapsed_secs += dt;
        self.frame_delta = speed.max(0.0) * dt;
        self.distance_traveled += self.frame_delta;
        self.frame_count += 1;
        self.frame_delta
    }
}
