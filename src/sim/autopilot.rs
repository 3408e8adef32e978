//! Demo autopilot
//!
//! Produces intents from the current state the way a cautious player would:
//! dodge obstacles in the current lane, otherwise drift toward coins. Used by
//! the headless driver and for long-run soak tests.

use super::bands::BandName;
use super::entity::EntityKind;
use super::state::GameState;
use super::tick::TickInput;

/// Seconds of approach the autopilot reacts to
const LOOKAHEAD_SECS: f32 = 0.75;
/// Distance at which it gives up on dodging and jumps instead
const JUMP_DISTANCE: f32 = 8.0;

/// Pick this frame's intent
pub fn autopilot(state: &GameState) -> TickInput {
    let lane = state.player.lane;
    let lookahead = state.scroll_speed() * LOOKAHEAD_SECS;
    let near = -state.detector.thresholds.obstacle;

    let active = state.registry.by_band(&state.bands, BandName::Active);
    let threat_in = |l: u32| -> Option<f32> {
        active
            .iter()
            .filter(|e| e.kind() == EntityKind::Obstacle && e.lane() == l)
            .map(|e| e.z())
            .filter(|&z| z >= near && z <= lookahead)
            .reduce(f32::min)
    };

    if let Some(z) = threat_in(lane) {
        for delta in [-1, 1] {
            if let Some(target) = state.lanes.offset(lane, delta) {
                if threat_in(target).is_none() {
                    return TickInput {
                        lane_delta: delta,
                        ..TickInput::IDLE
                    };
                }
            }
        }
        if z <= JUMP_DISTANCE && state.player.is_grounded() {
            return TickInput::jump(state.config.max_jump_height);
        }
        return TickInput::IDLE;
    }

    // Nearest coin ahead, in a lane that is safe to enter
    let coin_lane = active
        .iter()
        .filter(|e| e.kind() == EntityKind::Collectible && e.z() > 0.0 && e.z() <= lookahead)
        .min_by(|a, b| a.z().total_cmp(&b.z()))
        .map(|e| e.lane());

    match coin_lane {
        Some(target) if target != lane => {
            let delta = if target > lane { 1 } else { -1 };
            match state.lanes.offset(lane, delta) {
                Some(next) if threat_in(next).is_none() => TickInput {
                    lane_delta: delta,
                    ..TickInput::IDLE
                },
                _ => TickInput::IDLE,
            }
        }
        _ => TickInput::IDLE,
    }
}
