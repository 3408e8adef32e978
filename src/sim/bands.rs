//! Spawn bands: named Z intervals relative to the player
//!
//! Bands are fixed at configuration time. The only runtime state is the
//! cumulative world progress counter, used for distance-gated spawning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::{BandBounds, TuningConfig};

/// Semantic role of a band, ordered from behind the player to far ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BandName {
    /// Behind the player; anything here gets removed
    Recycle,
    /// Interactive zone; the only band collisions are checked in
    Active,
    /// Where new entities appear
    SpawnAhead,
    /// Far lookahead, nothing interactive
    Buffer,
}

impl BandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BandName::Recycle => "recycle",
            BandName::Active => "active",
            BandName::SpawnAhead => "spawn_ahead",
            BandName::Buffer => "buffer",
        }
    }
}

impl fmt::Display for BandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BandName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recycle" => Ok(BandName::Recycle),
            "active" => Ok(BandName::Active),
            "spawn_ahead" | "spawn-ahead" | "spawn" => Ok(BandName::SpawnAhead),
            "buffer" => Ok(BandName::Buffer),
            _ => Err(ConfigError::UnknownBand(s.to_string())),
        }
    }
}

/// A named Z interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    pub name: BandName,
    pub min_z: f32,
    pub max_z: f32,
}

impl SpawnBand {
    pub fn new(name: BandName, bounds: BandBounds) -> Self {
        Self {
            name,
            min_z: bounds.min_z,
            max_z: bounds.max_z,
        }
    }

    /// Half-open containment; `inclusive_max` closes the top edge
    #[inline]
    fn contains(&self, z: f32, inclusive_max: bool) -> bool {
        z >= self.min_z && (z < self.max_z || (inclusive_max && z == self.max_z))
    }

    /// Representative position used for spawning (band midpoint)
    #[inline]
    pub fn midpoint(&self) -> f32 {
        (self.min_z + self.max_z) / 2.0
    }
}

/// The four bands plus cumulative world progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnBands {
    /// Ordered by [`BandName`] (recycle first)
    bands: [SpawnBand; 4],
    world_progress: f32,
}

impl SpawnBands {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self::new([
            config.recycle_band,
            config.active_band,
            config.spawn_ahead_band,
            config.buffer_band,
        ])
    }

    /// Bounds in recycle, active, spawn-ahead, buffer order
    pub fn new(bounds: [BandBounds; 4]) -> Self {
        let bands = [
            SpawnBand::new(BandName::Recycle, bounds[0]),
            SpawnBand::new(BandName::Active, bounds[1]),
            SpawnBand::new(BandName::SpawnAhead, bounds[2]),
            SpawnBand::new(BandName::Buffer, bounds[3]),
        ];
        for pair in bands.windows(2) {
            assert!(
                pair[0].min_z < pair[0].max_z && pair[0].max_z <= pair[1].min_z,
                "bands `{}` and `{}` are inverted or overlap",
                pair[0].name,
                pair[1].name
            );
        }
        Self {
            bands,
            world_progress: 0.0,
        }
    }

    pub fn band(&self, name: BandName) -> &SpawnBand {
        &self.bands[name as usize]
    }

    pub fn bands(&self) -> &[SpawnBand] {
        &self.bands
    }

    /// Which band a Z position falls into, if any
    pub fn classify(&self, z: f32) -> Option<BandName> {
        let last = self.bands.len() - 1;
        self.bands
            .iter()
            .enumerate()
            .find(|(i, band)| band.contains(z, *i == last))
            .map(|(_, band)| band.name)
    }

    /// True for anything in the recycle band or already behind it
    pub fn should_recycle(&self, z: f32) -> bool {
        z < self.band(BandName::Recycle).max_z
    }

    /// Representative spawn Z for a band
    pub fn spawn_point_for(&self, name: BandName) -> f32 {
        self.band(name).midpoint()
    }

    /// Accumulate world progress
    pub fn advance(&mut self, delta_distance: f32) {
        self.world_progress += delta_distance.max(0.0);
    }

    pub fn world_progress(&self) -> f32 {
        self.world_progress
    }

    /// Number of `interval` multiples crossed when progress moved from `before` to now
    pub fn crossings_since(&self, before: f32, interval: f32) -> u32 {
        if interval <= 0.0 || self.world_progress <= before {
            return 0;
        }
        let prev = (before / interval).floor() as i64;
        let now = (self.world_progress / interval).floor() as i64;
        (now - prev).max(0) as u32
    }

    pub fn reset(&mut self) {
        self.world_progress = 0.0;
    }
}
