//! The player: lane index plus height above ground (always at z = 0)

use serde::{Deserialize, Serialize};

use super::action::{IntentKind, PlayerActions};
use super::lanes::LaneSpace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lane: u32,
    /// Height above the ground (0 = grounded)
    pub y: f32,
    pub max_height: f32,
    /// Downward speed while airborne (units/sec)
    pub fall_speed: f32,
}

impl Player {
    pub fn new(lane: u32, max_height: f32, fall_speed: f32) -> Self {
        Self {
            lane,
            y: 0.0,
            max_height,
            fall_speed,
        }
    }

    /// Player z is fixed; the world scrolls past
    #[inline]
    pub fn z(&self) -> f32 {
        0.0
    }

    pub fn is_grounded(&self) -> bool {
        self.y <= 0.0
    }

    /// Try a lane step through the action gate; returns true if the lane changed
    pub fn try_change_lane(
        &mut self,
        delta: i32,
        lanes: &LaneSpace,
        actions: &mut PlayerActions,
    ) -> bool {
        debug_assert!(lanes.is_valid(self.lane), "player in lane {}", self.lane);
        if delta == 0 || !actions.can_execute(IntentKind::LaneChange) {
            return false;
        }
        match lanes.offset(self.lane, delta.signum()) {
            Some(target) => {
                self.lane = target;
                actions.lane_changed();
                true
            }
            None => false,
        }
    }

    /// Apply vertical intent (if permitted), then gravity
    pub fn apply_vertical(&mut self, delta: f32, dt: f32, actions: &PlayerActions) {
        // Non-finite pushes are dropped so y can never become NaN
        let delta = if delta.is_finite() { delta } else { 0.0 };
        if delta != 0.0 && actions.can_execute(IntentKind::Vertical) {
            self.y = (self.y + delta).clamp(0.0, self.max_height);
        } else if self.y > 0.0 {
            self.y = (self.y - self.fall_speed * dt).max(0.0);
        }
    }
}
