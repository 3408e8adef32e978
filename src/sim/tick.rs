//! Per-frame update
//!
//! Core game loop that advances the run by one rendered frame. Step order is
//! load-bearing:
//!
//! 1. advance clock and world distance
//! 2. difficulty from the new distance
//! 3. spawners (obstacles only while Playing)
//! 4. entity step + band cleanup
//! 5. action timers, then intents through the action gate
//! 6. collision detection (phase- and grace-gated)
//! 7. resolution into domain events
//! 8. events applied to score and health
//! 9. phase transitions
//!
//! Candidates and events are built fresh here and returned in [`FrameOutput`];
//! nothing from one frame is read by the next.

use serde::{Deserialize, Serialize};

use super::collision::{self, DetectContext};
use super::difficulty::DifficultyState;
use super::entity::EntityId;
use super::events::DomainEvent;
use super::phase::{GamePhase, PhaseInputs};
use super::state::GameState;
use crate::secs_to_ms;

/// Semantic player intent for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// -1 = move left, 0 = stay, 1 = move right
    pub lane_delta: i32,
    /// Upward push this frame (0 = none)
    pub vertical_delta: f32,
}

impl TickInput {
    pub const IDLE: TickInput = TickInput {
        lane_delta: 0,
        vertical_delta: 0.0,
    };

    pub fn left() -> Self {
        Self {
            lane_delta: -1,
            ..Self::IDLE
        }
    }

    pub fn right() -> Self {
        Self {
            lane_delta: 1,
            ..Self::IDLE
        }
    }

    pub fn jump(amount: f32) -> Self {
        Self {
            vertical_delta: amount,
            ..Self::IDLE
        }
    }
}

/// Everything that happened during one frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameOutput {
    /// Events resolved this frame (for audio/VFX)
    pub events: Vec<DomainEvent>,
    pub score_delta: u64,
    /// Lives actually removed this frame (0 or 1)
    pub damage_applied: u32,
    pub spawned: Vec<EntityId>,
    pub recycled: usize,
    pub phase_change: Option<(GamePhase, GamePhase)>,
    /// New level if difficulty went up this frame
    pub level_up: Option<u32>,
    pub difficulty: DifficultyState,
    /// True if the lane actually changed this frame
    pub lane_changed: bool,
}

/// Advance the run by one frame of `dt` seconds.
///
/// `dt` is taken as-is apart from non-finite or negative values, which advance
/// nothing. Hitch clamping and fixed substeps belong to the caller (see the
/// driver); a single frame must stay short enough that entities cannot scroll
/// from the spawn bands past the active band.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> FrameOutput {
    // Terminal: no clock, spawns, collisions or phase changes
    if state.phase.is_game_over() {
        return FrameOutput {
            difficulty: state.current_difficulty(),
            ..Default::default()
        };
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut out = FrameOutput::default();

    // 1. Clock / distance (speed from the distance at frame start)
    let prior = state.current_difficulty();
    let scroll_speed = state.config.base_scroll_speed * prior.speed_multiplier;
    let progress_before = state.bands.world_progress();
    let delta = state.clock.advance(dt, scroll_speed);
    state.bands.advance(delta);

    // 2. Difficulty
    let difficulty = state.current_difficulty();
    if difficulty.level > prior.level {
        log::info!(
            "Difficulty level {} at distance {:.0}",
            difficulty.level,
            state.clock.distance_traveled
        );
        out.level_up = Some(difficulty.level);
    }
    out.difficulty = difficulty;

    // 3. Spawners
    let lane_count = state.lanes.lane_count();
    let distance = state.clock.distance_traveled;
    out.spawned = state.collectible_spawner.run(
        &mut state.rng,
        progress_before,
        &state.bands,
        &mut state.registry,
        lane_count,
        distance,
    );
    if state.phase.obstacles_enabled() {
        if let Some(id) = state.obstacle_spawner.run(
            &mut state.rng,
            &difficulty,
            &state.bands,
            &mut state.registry,
            lane_count,
            distance,
        ) {
            out.spawned.push(id);
        }
    }

    // 4. Entity step, then recycle
    state.registry.update(dt, scroll_speed);
    out.recycled = state.registry.cleanup(&state.bands);

    // 5. Action timers, then intents
    state.actions.tick(secs_to_ms(dt));
    out.lane_changed =
        state
            .player
            .try_change_lane(input.lane_delta, &state.lanes, &mut state.actions);
    state
        .player
        .apply_vertical(input.vertical_delta, dt, &state.actions);

    // 6. Detection
    let candidates = state.detector.detect(
        &state.player,
        &state.registry,
        &state.bands,
        DetectContext {
            elapsed_secs: state.clock.elapsed_secs,
            obstacles_enabled: state.phase.obstacles_enabled(),
            sweep: scroll_speed * dt,
        },
    );

    // 7. Resolution
    let events = collision::resolve(
        &candidates,
        &mut state.registry,
        &state.detector.thresholds,
        difficulty.severity_multiplier,
    );

    // 8. Score and health
    out.score_delta = state.score.consume(&events);
    out.damage_applied = apply_collisions(state, &events);

    // 9. Phase
    out.phase_change = state.phase.evaluate(PhaseInputs {
        elapsed_secs: state.clock.elapsed_secs,
        world_progress: state.bands.world_progress(),
        damage_applied: out.damage_applied > 0,
        alive: state.health.alive,
    });
    if let Some((_, GamePhase::GameOver)) = out.phase_change {
        log::info!(
            "Game over: {} coins, distance {:.0}, {:.1}s",
            state.score.coins_collected,
            state.clock.distance_traveled,
            state.clock.elapsed_secs
        );
    }

    out.events = events;
    out
}

/// Damage, stun and obstacle removal for this frame's collisions.
///
/// At most one life is lost per frame, and none while already stunned. Every
/// collision requests a stun; the longest one is applied once. Collided
/// obstacles are removed whether or not damage was honored.
fn apply_collisions(state: &mut GameState, events: &[DomainEvent]) -> u32 {
    let mut damage = 0;
    for event in events {
        let DomainEvent::Collision {
            entity_id,
            severity,
            ..
        } = *event
        else {
            continue;
        };

        if damage == 0 && !state.actions.state.is_stunned() {
            damage = state.health.apply_damage(1);
            if damage > 0 {
                log::debug!(
                    "Hit by obstacle {} (severity {:.2}), {} lives left",
                    entity_id,
                    severity,
                    state.health.lives
                );
            }
        }
        let stun_ms = state.stun_duration_ms(severity);
        state.actions.request_stun(stun_ms);
        state.registry.unregister(entity_id);
    }
    state.actions.commit_stun();
    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::action::PlayerActionState;
    use crate::sim::entity::{Entity, EntityKind};

    /// Run idle frames until obstacles are live and collisions can register
    fn play(state: &mut GameState) {
        while state.phase() == GamePhase::Grace
            || state
                .detector
                .grace
                .is_active(state.clock.elapsed_secs, state.world_progress())
        {
            tick(state, &TickInput::IDLE, FRAME_DT);
        }
        // Clear anything spawned so tests control the field
        state.registry.clear();
    }

    #[test]
    fn test_grace_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase(), GamePhase::Grace);
        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert!(out.phase_change.is_none());

        // 150 units at 60/s = 2.5s, before the 3s timer
        let mut frames = 1;
        while state.phase() == GamePhase::Grace {
            tick(&mut state, &TickInput::IDLE, FRAME_DT);
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.world_progress() >= 150.0);
    }

    #[test]
    fn test_no_obstacles_during_grace() {
        let mut state = GameState::new(3);
        while state.phase() == GamePhase::Grace {
            tick(&mut state, &TickInput::IDLE, FRAME_DT);
            if state.phase() == GamePhase::Grace {
                assert_eq!(state.registry.count_of(EntityKind::Obstacle), 0);
            }
        }
        assert!(state.registry.count_of(EntityKind::Collectible) > 0);
    }

    #[test]
    fn test_lane_change_is_gated() {
        let mut state = GameState::new(1);
        let out = tick(&mut state, &TickInput::right(), FRAME_DT);
        assert!(out.lane_changed);
        assert_eq!(state.player.lane, 2);
        assert_eq!(
            state.action_state(),
            PlayerActionState::LaneSwitchCooldown { remaining_ms: 100.0 }
        );

        let out = tick(&mut state, &TickInput::left(), FRAME_DT);
        assert!(!out.lane_changed);
        assert_eq!(state.player.lane, 2);
    }

    #[test]
    fn test_obstacle_hit_costs_one_life_and_recovers() {
        let mut state = GameState::new(5);
        play(&mut state);

        let id = state.registry.allocate_id();
        state
            .registry
            .register(Entity::obstacle(id, state.player.lane, 0.5, 0.0));

        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert_eq!(out.damage_applied, 1);
        assert_eq!(state.lives(), 2);
        assert!(out.events.iter().any(|e| e.is_collision()));
        assert!(!state.registry.contains(id));
        assert!(state.action_state().is_stunned());
        assert_eq!(
            out.phase_change,
            Some((GamePhase::Playing, GamePhase::HitRecovery))
        );

        // No obstacle spawns during recovery
        let recovery_frames = (state.config.recovery_secs / FRAME_DT) as usize + 2;
        for _ in 0..recovery_frames {
            tick(&mut state, &TickInput::IDLE, FRAME_DT);
            if state.phase() == GamePhase::HitRecovery {
                assert_eq!(state.registry.count_of(EntityKind::Obstacle), 0);
            }
        }
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_simultaneous_hits_cost_one_life() {
        let mut state = GameState::with_config(
            9,
            crate::tuning::TuningConfig {
                obstacle_policy: crate::tuning::ObstaclePolicy::MultiLane,
                ..Default::default()
            },
        )
        .unwrap();
        play(&mut state);

        let lane = state.player.lane;
        for z in [0.0, 0.5, 1.0] {
            let id = state.registry.allocate_id();
            state.registry.register(Entity::obstacle(id, lane, z, 0.0));
        }

        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert_eq!(out.events.iter().filter(|e| e.is_collision()).count(), 3);
        assert_eq!(out.damage_applied, 1);
        assert_eq!(state.lives(), 2);
        assert_eq!(state.registry.count_of(EntityKind::Obstacle), 0);
    }

    #[test]
    fn test_long_frame_cannot_skip_obstacle() {
        let mut state = GameState::new(6);
        play(&mut state);
        assert_eq!(state.scroll_speed(), 60.0);

        // 6 units per frame at dt = 0.1: z goes 3.0 -> -3.0, across the window
        let id = state.registry.allocate_id();
        state
            .registry
            .register(Entity::obstacle(id, state.player.lane, 3.0, 0.0));
        let out = tick(&mut state, &TickInput::IDLE, 0.1);

        assert!(out.events.iter().any(|e| e.entity_id() == id && e.is_collision()));
        assert_eq!(out.damage_applied, 1);
        assert_eq!(state.lives(), 2);
        assert!(!state.registry.contains(id));
    }

    #[test]
    fn test_long_frame_keeps_elapsed_time() {
        let mut state = GameState::new(6);
        play(&mut state);
        let elapsed = state.clock.elapsed_secs;

        // 15 units in one frame: z goes 10.0 -> -5.0
        let id = state.registry.allocate_id();
        state
            .registry
            .register(Entity::obstacle(id, state.player.lane, 10.0, 0.0));
        let out = tick(&mut state, &TickInput::IDLE, 0.25);

        assert!((state.clock.elapsed_secs - elapsed - 0.25).abs() < 1e-4);
        assert_eq!(out.damage_applied, 1);
    }

    #[test]
    fn test_non_finite_dt_advances_nothing() {
        let mut state = GameState::new(8);
        tick(&mut state, &TickInput::IDLE, FRAME_DT);
        let elapsed = state.clock.elapsed_secs;
        let distance = state.clock.distance_traveled;

        for dt in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -1.0] {
            tick(&mut state, &TickInput::IDLE, dt);
        }
        assert_eq!(state.clock.elapsed_secs, elapsed);
        assert_eq!(state.clock.distance_traveled, distance);
        assert!(state.registry.iter().all(|e| e.z().is_finite()));

        tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert!(state.clock.elapsed_secs > elapsed);
    }

    #[test]
    fn test_non_finite_vertical_push_is_ignored() {
        let mut state = GameState::new(8);
        tick(&mut state, &TickInput::jump(f32::NAN), FRAME_DT);
        assert_eq!(state.player.y, 0.0);

        tick(&mut state, &TickInput::jump(2.0), FRAME_DT);
        assert_eq!(state.player.y, 2.0);
        tick(&mut state, &TickInput::jump(f32::INFINITY), FRAME_DT);
        assert!(state.player.y.is_finite());
    }

    #[test]
    fn test_hit_while_still_stunned_costs_no_life() {
        let config = crate::tuning::TuningConfig {
            stun_base_ms: 5000.0,
            recovery_secs: 0.1,
            ..Default::default()
        };
        let mut state = GameState::with_config(4, config).unwrap();
        play(&mut state);

        let z = state.scroll_speed() * FRAME_DT;
        let first = state.registry.allocate_id();
        state
            .registry
            .register(Entity::obstacle(first, state.player.lane, z, 0.0));
        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert_eq!(out.damage_applied, 1);
        assert_eq!(state.phase(), GamePhase::HitRecovery);

        // Recovery is short, the stun is not
        while state.phase() != GamePhase::Playing {
            tick(&mut state, &TickInput::IDLE, FRAME_DT);
        }
        assert!(state.action_state().is_stunned());
        state.registry.clear();

        let z = state.scroll_speed() * FRAME_DT;
        let second = state.registry.allocate_id();
        state
            .registry
            .register(Entity::obstacle(second, state.player.lane, z, 0.0));
        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);

        assert!(out.events.iter().any(|e| e.entity_id() == second && e.is_collision()));
        assert_eq!(out.damage_applied, 0);
        assert_eq!(state.lives(), 2);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(out.phase_change.is_none());
        assert!(!state.registry.contains(second));
    }

    #[test]
    fn test_collectible_scores() {
        let mut state = GameState::new(11);
        play(&mut state);

        let id = state.registry.allocate_id();
        state
            .registry
            .register(Entity::collectible(id, state.player.lane, 0.0, 0.0, 1));

        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert_eq!(out.score_delta, 1);
        assert_eq!(state.coins_collected(), 1);
        assert!(!state.registry.contains(id));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = GameState::new(2);
        play(&mut state);
        state.health.lives = 1;

        let id = state.registry.allocate_id();
        state
            .registry
            .register(Entity::obstacle(id, state.player.lane, 0.0, 0.0));
        let out = tick(&mut state, &TickInput::IDLE, FRAME_DT);
        assert_eq!(
            out.phase_change,
            Some((GamePhase::Playing, GamePhase::GameOver))
        );

        let entities = state.registry.len();
        let elapsed = state.clock.elapsed_secs;
        for _ in 0..600 {
            let out = tick(&mut state, &TickInput::right(), FRAME_DT);
            assert!(out.events.is_empty());
            assert!(out.spawned.is_empty());
        }
        assert_eq!(state.registry.len(), entities);
        assert_eq!(state.clock.elapsed_secs, elapsed);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput::IDLE,
            TickInput::right(),
            TickInput::jump(2.0),
            TickInput::left(),
            TickInput::IDLE,
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, FRAME_DT);
            tick(&mut state2, input, FRAME_DT);
        }

        assert_eq!(state1.clock.frame_count, state2.clock.frame_count);
        assert_eq!(state1.coins_collected(), state2.coins_collected());
        assert_eq!(state1.lives(), state2.lives());
        let ids1: Vec<_> = state1.registry.iter().map(|e| (e.id(), e.lane())).collect();
        let ids2: Vec<_> = state2.registry.iter().map(|e| (e.id(), e.lane())).collect();
        assert_eq!(ids1, ids2);
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut state = GameState::new(4);
        for _ in 0..400 {
            tick(&mut state, &TickInput::IDLE, FRAME_DT);
        }
        state.restart();
        assert_eq!(state.phase(), GamePhase::Grace);
        assert_eq!(state.coins_collected(), 0);
        assert_eq!(state.world_progress(), 0.0);
        assert!(state.registry.is_empty());
        assert_eq!(state.run_index, 2);
    }
}
