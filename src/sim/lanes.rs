//! Lane geometry: discrete lateral lanes and their center offsets

use serde::{Deserialize, Serialize};

/// N lanes of equal width, centered on x = 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSpace {
    lane_count: u32,
    lane_width: f32,
}

impl LaneSpace {
    /// Panics on zero lanes: that is a configuration error caught at startup
    pub fn new(lane_count: u32, lane_width: f32) -> Self {
        assert!(lane_count > 0, "LaneSpace requires at least one lane");
        assert!(lane_width > 0.0, "lane width must be positive");
        Self {
            lane_count,
            lane_width,
        }
    }

    #[inline]
    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    #[inline]
    pub fn is_valid(&self, lane: u32) -> bool {
        lane < self.lane_count
    }

    /// Lateral center of a lane (lane 0 is leftmost)
    pub fn center_x(&self, lane: u32) -> f32 {
        let middle = (self.lane_count as f32 - 1.0) / 2.0;
        (lane as f32 - middle) * self.lane_width
    }

    /// Apply a signed lane step; None if it would leave the lane range
    pub fn offset(&self, lane: u32, delta: i32) -> Option<u32> {
        let target = lane as i64 + delta as i64;
        if target < 0 || target >= self.lane_count as i64 {
            None
        } else {
            Some(target as u32)
        }
    }
}
