//! Gameplay entities
//!
//! Entities are a closed set of variants stepped by `match`, so adding a new
//! kind forces every system that handles entities to decide what to do with it.

use serde::{Deserialize, Serialize};

/// Registry-assigned entity id (monotonic, never reused within a run)
pub type EntityId = u32;

/// Entity kind, used for per-type registry buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Collectible,
    Obstacle,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Collectible => "collectible",
            EntityKind::Obstacle => "obstacle",
        }
    }
}

/// A coin-like pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub lane: u32,
    pub z: f32,
    /// Height above the ground
    pub y: f32,
    /// World distance at creation
    pub spawn_distance: f32,
    /// Score units granted when consumed
    pub value: u32,
    /// Cosmetic spin angle (radians), advanced each step
    #[serde(default)]
    pub spin: f32,
}

/// A lane-blocking hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub lane: u32,
    pub z: f32,
    pub y: f32,
    pub spawn_distance: f32,
}

/// A spawned gameplay object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Collectible(Collectible),
    Obstacle(Obstacle),
}

/// Collectible spin rate (radians/sec), purely cosmetic
const COLLECTIBLE_SPIN_RATE: f32 = 3.0;

impl Entity {
    pub fn collectible(id: EntityId, lane: u32, z: f32, spawn_distance: f32, value: u32) -> Self {
        Entity::Collectible(Collectible {
            id,
            lane,
            z,
            y: 0.0,
            spawn_distance,
            value,
            spin: 0.0,
        })
    }

    pub fn obstacle(id: EntityId, lane: u32, z: f32, spawn_distance: f32) -> Self {
        Entity::Obstacle(Obstacle {
            id,
            lane,
            z,
            y: 0.0,
            spawn_distance,
        })
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::Collectible(c) => c.id,
            Entity::Obstacle(o) => o.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Collectible(_) => EntityKind::Collectible,
            Entity::Obstacle(_) => EntityKind::Obstacle,
        }
    }

    pub fn lane(&self) -> u32 {
        match self {
            Entity::Collectible(c) => c.lane,
            Entity::Obstacle(o) => o.lane,
        }
    }

    pub fn z(&self) -> f32 {
        match self {
            Entity::Collectible(c) => c.z,
            Entity::Obstacle(o) => o.z,
        }
    }

    pub fn y(&self) -> f32 {
        match self {
            Entity::Collectible(c) => c.y,
            Entity::Obstacle(o) => o.y,
        }
    }

    /// Per-entity step: follow world scroll toward the player
    pub fn step(&mut self, dt: f32, scroll_speed: f32) {
        let dz = scroll_speed * dt;
        match self {
            Entity::Collectible(c) => {
                c.z -= dz;
                c.spin = (c.spin + COLLECTIBLE_SPIN_RATE * dt) % std::f32::consts::TAU;
            }
            Entity::Obstacle(o) => {
                o.z -= dz;
            }
        }
    }

    /// Fraction of the approach covered since spawn (0 at spawn, 1 at the player)
    pub fn progress(&self, spawn_z: f32) -> f32 {
        if spawn_z <= 0.0 {
            return 1.0;
        }
        (1.0 - self.z() / spawn_z).clamp(0.0, 1.0)
    }
}
