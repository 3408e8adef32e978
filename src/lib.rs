//! Lane Runner - simulation core of an endless lane-runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, health, phases)
//! - `tuning`: Data-driven game balance
//! - `snapshot`: Read-only per-frame handoff to presentation
//! - `error`: Configuration errors

pub mod error;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::ConfigError;
pub use snapshot::FrameSnapshot;
pub use tuning::TuningConfig;

/// Game configuration constants (defaults for [`TuningConfig`])
pub mod consts {
    /// Nominal frame timestep for the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest wall-clock frame delta the driver feeds in (hitch clamp)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Max fixed steps per rendered frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Lane layout
    pub const LANE_COUNT: u32 = 3;
    pub const LANE_WIDTH: f32 = 3.0;
    /// Lane the player starts in (center of three)
    pub const START_LANE: u32 = 1;

    /// Spawn bands, relative to the player at z = 0
    pub const RECYCLE_BAND: (f32, f32) = (-200.0, -50.0);
    pub const ACTIVE_BAND: (f32, f32) = (-50.0, 150.0);
    pub const SPAWN_AHEAD_BAND: (f32, f32) = (150.0, 300.0);
    pub const BUFFER_BAND: (f32, f32) = (300.0, 500.0);

    /// World scroll speed at difficulty level 1 (units/sec)
    pub const BASE_SCROLL_SPEED: f32 = 60.0;

    /// Grace window at run start
    pub const GRACE_SECS: f32 = 3.0;
    pub const GRACE_DISTANCE: f32 = 150.0;

    /// Player action timings
    pub const LANE_SWITCH_COOLDOWN_MS: f32 = 100.0;
    pub const STUN_BASE_MS: f32 = 600.0;
    /// Extra stun per unit of severity (1.0 = double at full severity)
    pub const STUN_INTENSITY_SCALE: f32 = 1.0;
    /// Time spent in HitRecovery before obstacles can hurt again
    pub const RECOVERY_SECS: f32 = 1.5;

    /// Vertical movement
    pub const MAX_JUMP_HEIGHT: f32 = 4.0;
    pub const FALL_SPEED: f32 = 8.0;

    /// Collision thresholds (longitudinal distance along z)
    pub const OBSTACLE_HIT_DISTANCE: f32 = 2.5;
    pub const COLLECTIBLE_HIT_DISTANCE: f32 = 3.0;
    /// Vertical distance beyond which nothing collides
    pub const HEIGHT_THRESHOLD: f32 = 1.5;

    /// Spawning
    pub const COLLECTIBLE_INTERVAL: f32 = 50.0;
    pub const COLLECTIBLE_VALUE: u32 = 1;
    pub const OBSTACLE_BASE_INTERVAL: f32 = 120.0;
    pub const OBSTACLE_MIN_INTERVAL: f32 = 30.0;

    /// Difficulty curve
    pub const DISTANCE_PER_LEVEL: f32 = 500.0;
    pub const SCALAR_PER_LEVEL: f32 = 0.1;
    pub const MAX_DIFFICULTY_SCALAR: f32 = 3.0;
    pub const SPEED_PER_LEVEL: f32 = 0.05;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;

    /// Player lives at run start
    pub const STARTING_LIVES: u32 = 3;
}

/// Convert a frame delta in seconds to milliseconds
#[inline]
pub fn secs_to_ms(secs: f32) -> f32 {
    secs * 1000.0
}
