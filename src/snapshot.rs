//! Read-only handoff to presentation
//!
//! Built once at the end of a frame from [`GameState`] and that frame's
//! [`FrameOutput`]. Renderers, audio and UI read it; nothing flows back.

use glam::Vec3;
use serde::Serialize;

use crate::sim::{
    DifficultyState, DomainEvent, EntityId, EntityKind, FrameOutput, GamePhase, GameState,
    PlayerActionState,
};

/// One entity as presentation sees it
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub lane: u32,
    pub z: f32,
    /// World position (lane center x, height y, z)
    pub position: Vec3,
    /// 0 at spawn point, 1 at the player
    pub progress: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub lane: u32,
    pub position: Vec3,
    pub action: PlayerActionState,
}

/// Everything presentation needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub elapsed_secs: f32,
    pub distance: f32,
    pub phase: GamePhase,
    pub difficulty: DifficultyState,
    pub lives: u32,
    pub coins_collected: u64,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
    pub events: Vec<DomainEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, output: &FrameOutput) -> Self {
        let lanes = &state.lanes;
        let spawn_z = state
            .bands
            .spawn_point_for(crate::sim::BandName::SpawnAhead);

        let entities = state
            .registry
            .iter()
            .map(|e| EntityView {
                id: e.id(),
                kind: e.kind(),
                lane: e.lane(),
                z: e.z(),
                position: Vec3::new(lanes.center_x(e.lane()), e.y(), e.z()),
                progress: e.progress(spawn_z),
            })
            .collect();

        Self {
            frame: state.clock.frame_count,
            elapsed_secs: state.clock.elapsed_secs,
            distance: state.clock.distance_traveled,
            phase: state.phase(),
            difficulty: output.difficulty,
            lives: state.lives(),
            coins_collected: state.coins_collected(),
            player: PlayerView {
                lane: state.player.lane,
                position: Vec3::new(
                    lanes.center_x(state.player.lane),
                    state.player.y,
                    state.player.z(),
                ),
                action: state.action_state(),
            },
            entities,
            events: output.events.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
