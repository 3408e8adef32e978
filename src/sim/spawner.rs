//! Distance-gated spawners
//!
//! Two independent policies:
//! - [`IntervalSpawner`]: one collectible every fixed distance increment
//! - [`ObstacleSpawner`]: obstacles on an interval that shrinks with difficulty
//!
//! Both place entities at the spawn-ahead band's representative position and
//! register them with the [`EntityRegistry`]. Randomness comes only from the
//! caller's seeded RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bands::{BandName, SpawnBands};
use super::difficulty::DifficultyState;
use super::entity::{Entity, EntityId, EntityKind};
use super::registry::EntityRegistry;
use crate::tuning::{ObstaclePolicy, TuningConfig};

/// Pick a lane, avoiding `avoid` when another lane exists.
///
/// Zero lanes yields None; if no lane satisfies the constraint the choice
/// falls back to uniform random.
pub fn pick_lane<R: Rng>(rng: &mut R, lane_count: u32, avoid: Option<u32>) -> Option<u32> {
    if lane_count == 0 {
        return None;
    }
    let candidates: Vec<u32> = (0..lane_count).filter(|&l| Some(l) != avoid).collect();
    if candidates.is_empty() {
        return Some(rng.random_range(0..lane_count));
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

/// Places one collectible each time world progress crosses an increment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalSpawner {
    pub interval: f32,
    pub value: u32,
}

impl IntervalSpawner {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            interval: config.collectible_interval,
            value: config.collectible_value,
        }
    }

    /// Spawn for every increment crossed since `progress_before`
    pub fn run<R: Rng>(
        &mut self,
        rng: &mut R,
        progress_before: f32,
        bands: &SpawnBands,
        registry: &mut EntityRegistry,
        lane_count: u32,
        distance: f32,
    ) -> Vec<EntityId> {
        let crossings = bands.crossings_since(progress_before, self.interval);
        let z = bands.spawn_point_for(BandName::SpawnAhead);

        let mut spawned = Vec::new();
        for _ in 0..crossings {
            let Some(lane) = pick_lane(rng, lane_count, None) else {
                break;
            };
            let id = registry.allocate_id();
            registry.register(Entity::collectible(id, lane, z, distance, self.value));
            log::debug!("Spawned collectible {} in lane {} at z={}", id, lane, z);
            spawned.push(id);
        }
        spawned
    }
}

/// Places obstacles on a difficulty-scaled distance interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    pub base_interval: f32,
    pub min_interval: f32,
    pub policy: ObstaclePolicy,
    /// Lane of the previous obstacle (avoided next time)
    pub last_lane: Option<u32>,
    /// World progress at the previous obstacle spawn
    pub last_spawn_progress: f32,
}

impl ObstacleSpawner {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            base_interval: config.obstacle_base_interval,
            min_interval: config.obstacle_min_interval,
            policy: config.obstacle_policy,
            last_lane: None,
            last_spawn_progress: 0.0,
        }
    }

    /// Current spawn interval; shrinks as spawn rate grows
    pub fn interval(&self, difficulty: &DifficultyState) -> f32 {
        let rate = difficulty.spawn_rate_multiplier.max(1.0);
        (self.base_interval / rate).max(self.min_interval)
    }

    /// Spawn at most one obstacle if the interval has elapsed
    pub fn run<R: Rng>(
        &mut self,
        rng: &mut R,
        difficulty: &DifficultyState,
        bands: &SpawnBands,
        registry: &mut EntityRegistry,
        lane_count: u32,
        distance: f32,
    ) -> Option<EntityId> {
        let progress = bands.world_progress();
        if progress - self.last_spawn_progress < self.interval(difficulty) {
            return None;
        }
        if self.policy == ObstaclePolicy::SingleObstacle
            && registry.count_of(EntityKind::Obstacle) > 0
        {
            return None;
        }

        let lane = pick_lane(rng, lane_count, self.last_lane)?;
        let z = bands.spawn_point_for(BandName::SpawnAhead);
        let id = registry.allocate_id();
        registry.register(Entity::obstacle(id, lane, z, distance));

        self.last_lane = Some(lane);
        self.last_spawn_progress = progress;
        log::debug!(
            "Spawned obstacle {} in lane {} (interval {:.1}, level {})",
            id,
            lane,
            self.interval(difficulty),
            difficulty.level
        );
        Some(id)
    }

    pub fn reset(&mut self) {
        self.last_lane = None;
        self.last_spawn_progress = 0.0;
    }
}
