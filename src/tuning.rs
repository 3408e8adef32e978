//! Data-driven game balance
//!
//! Every gameplay constant is fixed at the start of a run. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Which obstacle spawning policy a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObstaclePolicy {
    /// At most one live obstacle at a time (deterministic difficulty)
    #[default]
    SingleObstacle,
    /// Any number of live obstacles, spread across lanes
    MultiLane,
}

impl ObstaclePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstaclePolicy::SingleObstacle => "single",
            ObstaclePolicy::MultiLane => "multi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" | "single_obstacle" => Some(ObstaclePolicy::SingleObstacle),
            "multi" | "multi_lane" => Some(ObstaclePolicy::MultiLane),
            _ => None,
        }
    }
}

/// A Z interval as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandBounds {
    pub min_z: f32,
    pub max_z: f32,
}

impl From<(f32, f32)> for BandBounds {
    fn from((min_z, max_z): (f32, f32)) -> Self {
        Self { min_z, max_z }
    }
}

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    // === Lanes ===
    pub lane_count: u32,
    pub lane_width: f32,
    pub start_lane: u32,

    // === Bands ===
    pub recycle_band: BandBounds,
    pub active_band: BandBounds,
    pub spawn_ahead_band: BandBounds,
    pub buffer_band: BandBounds,

    // === World ===
    pub base_scroll_speed: f32,

    // === Grace ===
    pub grace_secs: f32,
    pub grace_distance: f32,

    // === Player ===
    pub lane_switch_cooldown_ms: f32,
    pub stun_base_ms: f32,
    pub stun_intensity_scale: f32,
    pub recovery_secs: f32,
    pub max_jump_height: f32,
    pub fall_speed: f32,
    pub starting_lives: u32,

    // === Collision ===
    pub obstacle_hit_distance: f32,
    pub collectible_hit_distance: f32,
    pub height_threshold: f32,

    // === Spawning ===
    pub collectible_interval: f32,
    pub collectible_value: u32,
    pub obstacle_base_interval: f32,
    pub obstacle_min_interval: f32,
    pub obstacle_policy: ObstaclePolicy,

    // === Difficulty ===
    pub distance_per_level: f32,
    pub scalar_per_level: f32,
    pub max_difficulty_scalar: f32,
    pub speed_per_level: f32,
    pub max_speed_multiplier: f32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            lane_width: LANE_WIDTH,
            start_lane: START_LANE,

            recycle_band: RECYCLE_BAND.into(),
            active_band: ACTIVE_BAND.into(),
            spawn_ahead_band: SPAWN_AHEAD_BAND.into(),
            buffer_band: BUFFER_BAND.into(),

            base_scroll_speed: BASE_SCROLL_SPEED,

            grace_secs: GRACE_SECS,
            grace_distance: GRACE_DISTANCE,

            lane_switch_cooldown_ms: LANE_SWITCH_COOLDOWN_MS,
            stun_base_ms: STUN_BASE_MS,
            stun_intensity_scale: STUN_INTENSITY_SCALE,
            recovery_secs: RECOVERY_SECS,
            max_jump_height: MAX_JUMP_HEIGHT,
            fall_speed: FALL_SPEED,
            starting_lives: STARTING_LIVES,

            obstacle_hit_distance: OBSTACLE_HIT_DISTANCE,
            collectible_hit_distance: COLLECTIBLE_HIT_DISTANCE,
            height_threshold: HEIGHT_THRESHOLD,

            collectible_interval: COLLECTIBLE_INTERVAL,
            collectible_value: COLLECTIBLE_VALUE,
            obstacle_base_interval: OBSTACLE_BASE_INTERVAL,
            obstacle_min_interval: OBSTACLE_MIN_INTERVAL,
            obstacle_policy: ObstaclePolicy::default(),

            distance_per_level: DISTANCE_PER_LEVEL,
            scalar_per_level: SCALAR_PER_LEVEL,
            max_difficulty_scalar: MAX_DIFFICULTY_SCALAR,
            speed_per_level: SPEED_PER_LEVEL,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
        }
    }
}

impl TuningConfig {
    /// Parse a (possibly partial) JSON config; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serialize to pretty JSON (for dumping the effective config)
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::ZeroLanes);
        }
        if self.lane_width <= 0.0 {
            return Err(ConfigError::InvalidLaneWidth(self.lane_width));
        }
        if self.start_lane >= self.lane_count {
            return Err(ConfigError::StartLaneOutOfRange {
                lane: self.start_lane,
                lane_count: self.lane_count,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        let bands = [
            ("recycle", self.recycle_band),
            ("active", self.active_band),
            ("spawn_ahead", self.spawn_ahead_band),
            ("buffer", self.buffer_band),
        ];
        for (band, bounds) in bands {
            if bounds.min_z >= bounds.max_z {
                return Err(ConfigError::InvalidBand {
                    band,
                    min: bounds.min_z,
                    max: bounds.max_z,
                });
            }
        }
        for pair in bands.windows(2) {
            let (lower, lo) = pair[0];
            let (upper, hi) = pair[1];
            if lo.max_z > hi.min_z {
                return Err(ConfigError::BandsOverlap { lower, upper });
            }
        }

        let positives = [
            ("base_scroll_speed", self.base_scroll_speed),
            ("collectible_interval", self.collectible_interval),
            ("obstacle_base_interval", self.obstacle_base_interval),
            ("obstacle_min_interval", self.obstacle_min_interval),
            ("distance_per_level", self.distance_per_level),
            ("obstacle_hit_distance", self.obstacle_hit_distance),
            ("collectible_hit_distance", self.collectible_hit_distance),
            ("height_threshold", self.height_threshold),
            ("max_difficulty_scalar", self.max_difficulty_scalar),
            ("max_speed_multiplier", self.max_speed_multiplier),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }
}
