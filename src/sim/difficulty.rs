//! Difficulty curve
//!
//! Difficulty is never stored. It is recomputed from cumulative distance every
//! frame, so two runs at the same distance always see the same multipliers.

use serde::{Deserialize, Serialize};

use crate::tuning::TuningConfig;

/// Difficulty bundle for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// 1-based level
    pub level: u32,
    /// Overall scalar (>= 1.0)
    pub scalar: f32,
    pub spawn_rate_multiplier: f32,
    pub speed_multiplier: f32,
    pub severity_multiplier: f32,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self {
            level: 1,
            scalar: 1.0,
            spawn_rate_multiplier: 1.0,
            speed_multiplier: 1.0,
            severity_multiplier: 1.0,
        }
    }
}

/// Maps distance to a [`DifficultyState`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyCurve {
    pub distance_per_level: f32,
    pub scalar_per_level: f32,
    pub max_scalar: f32,
    pub speed_per_level: f32,
    pub max_speed_multiplier: f32,
}

impl DifficultyCurve {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            distance_per_level: config.distance_per_level,
            scalar_per_level: config.scalar_per_level,
            max_scalar: config.max_difficulty_scalar.max(1.0),
            speed_per_level: config.speed_per_level,
            max_speed_multiplier: config.max_speed_multiplier.max(1.0),
        }
    }

    /// Level for a cumulative distance (level 1 covers [0, distance_per_level))
    pub fn level_at(&self, distance: f32) -> u32 {
        if self.distance_per_level <= 0.0 {
            return 1;
        }
        1 + (distance.max(0.0) / self.distance_per_level).floor() as u32
    }

    /// Full difficulty bundle for a cumulative distance
    pub fn state_at(&self, distance: f32) -> DifficultyState {
        let level = self.level_at(distance);
        let steps = (level - 1) as f32;

        let scalar = (1.0 + steps * self.scalar_per_level).clamp(1.0, self.max_scalar);
        let speed = (1.0 + steps * self.speed_per_level).clamp(1.0, self.max_speed_multiplier);

        DifficultyState {
            level,
            scalar,
            spawn_rate_multiplier: scalar,
            speed_multiplier: speed,
            severity_multiplier: scalar,
        }
    }
}
