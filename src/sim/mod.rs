//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Single-threaded, one `tick` per frame, nothing outlives a frame except
//!   registry entities and run-scoped state
//! - No rendering, audio or platform dependencies

pub mod action;
pub mod autopilot;
pub mod bands;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod events;
pub mod lanes;
pub mod phase;
pub mod player;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vitals;

pub use action::{IntentKind, PlayerActionState, PlayerActions};
pub use autopilot::autopilot;
pub use bands::{BandName, SpawnBand, SpawnBands};
pub use clock::Clock;
pub use collision::{
    CollisionCandidate, CollisionDetector, CollisionThresholds, DetectContext, GraceWindow,
    resolve,
};
pub use difficulty::{DifficultyCurve, DifficultyState};
pub use entity::{Collectible, Entity, EntityId, EntityKind, Obstacle};
pub use events::DomainEvent;
pub use lanes::LaneSpace;
pub use phase::{GamePhase, PhaseController, PhaseInputs};
pub use player::Player;
pub use registry::EntityRegistry;
pub use spawner::{IntervalSpawner, ObstacleSpawner, pick_lane};
pub use state::GameState;
pub use tick::{FrameOutput, TickInput, tick};
pub use vitals::{HealthState, ScoreState};
