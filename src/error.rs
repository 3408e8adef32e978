//! Configuration errors
//!
//! These are programmer/configuration mistakes caught once at startup.
//! Nothing in the per-frame path returns an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lane count must be at least 1")]
    ZeroLanes,

    #[error("lane width must be positive, got {0}")]
    InvalidLaneWidth(f32),

    #[error("start lane {lane} is outside 0..{lane_count}")]
    StartLaneOutOfRange { lane: u32, lane_count: u32 },

    #[error("band `{band}` is empty or inverted: [{min}, {max}]")]
    InvalidBand { band: &'static str, min: f32, max: f32 },

    #[error("bands must be ordered recycle < active < spawn-ahead < buffer (`{lower}` overlaps `{upper}`)")]
    BandsOverlap {
        lower: &'static str,
        upper: &'static str,
    },

    #[error("unknown band name `{0}`")]
    UnknownBand(String),

    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("starting lives must be at least 1")]
    NoLives,

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
