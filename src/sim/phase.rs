//! Top-level run phase
//!
//! `Grace -> Playing <-> HitRecovery -> GameOver`. The phase decides which
//! systems run each frame; `GameOver` has no outgoing transitions.

use serde::{Deserialize, Serialize};

use crate::tuning::TuningConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start-of-run window: no obstacles
    Grace,
    /// Active gameplay
    Playing,
    /// Brief window after a hit: no obstacles spawn or hurt
    HitRecovery,
    /// Run ended
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Grace => "Grace",
            GamePhase::Playing => "Playing",
            GamePhase::HitRecovery => "HitRecovery",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// What the phase machine looks at after health/score have been applied
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseInputs {
    pub elapsed_secs: f32,
    pub world_progress: f32,
    /// An obstacle collision turned into real damage this frame
    pub damage_applied: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseController {
    phase: GamePhase,
    /// Run time (secs) at which the current phase began
    phase_start_time: f32,
    pub grace_secs: f32,
    pub grace_distance: f32,
    pub recovery_secs: f32,
}

impl PhaseController {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            phase: GamePhase::Grace,
            phase_start_time: 0.0,
            grace_secs: config.grace_secs,
            grace_distance: config.grace_distance,
            recovery_secs: config.recovery_secs,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn phase_start_time(&self) -> f32 {
        self.phase_start_time
    }

    /// Obstacle spawning and obstacle collisions only run while Playing
    pub fn obstacles_enabled(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Evaluate transitions; returns `(from, to)` if the phase changed
    pub fn evaluate(&mut self, inputs: PhaseInputs) -> Option<(GamePhase, GamePhase)> {
        let next = match self.phase {
            GamePhase::GameOver => return None,
            _ if !inputs.alive => GamePhase::GameOver,
            GamePhase::Grace => {
                if inputs.world_progress >= self.grace_distance
                    || inputs.elapsed_secs >= self.grace_secs
                {
                    GamePhase::Playing
                } else {
                    return None;
                }
            }
            GamePhase::Playing => {
                if inputs.damage_applied {
                    GamePhase::HitRecovery
                } else {
                    return None;
                }
            }
            GamePhase::HitRecovery => {
                if inputs.elapsed_secs - self.phase_start_time >= self.recovery_secs {
                    GamePhase::Playing
                } else {
                    return None;
                }
            }
        };

        let from = self.phase;
        self.phase = next;
        self.phase_start_time = inputs.elapsed_secs;
        log::info!(
            "Phase {} -> {} at t={:.2}s",
            from.as_str(),
            next.as_str(),
            inputs.elapsed_secs
        );
        Some((from, next))
    }

    pub fn reset(&mut self) {
        self.phase = GamePhase::Grace;
        self.phase_start_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PhaseController {
        PhaseController::from_config(&TuningConfig::default())
    }

    fn alive_at(elapsed_secs: f32, world_progress: f32) -> PhaseInputs {
        PhaseInputs {
            elapsed_secs,
            world_progress,
            damage_applied: false,
            alive: true,
        }
    }

    #[test]
    fn test_grace_exits_on_either_threshold() {
        let mut by_time = controller();
        assert_eq!(by_time.evaluate(alive_at(1.0, 10.0)), None);
        assert_eq!(
            by_time.evaluate(alive_at(3.0, 10.0)),
            Some((GamePhase::Grace, GamePhase::Playing))
        );

        let mut by_distance = controller();
        by_distance.evaluate(alive_at(0.5, 150.0));
        assert_eq!(by_distance.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_hit_recovery_round_trip() {
        let mut phase = controller();
        phase.evaluate(alive_at(3.0, 200.0));

        let hit = PhaseInputs {
            damage_applied: true,
            ..alive_at(5.0, 300.0)
        };
        assert_eq!(
            phase.evaluate(hit),
            Some((GamePhase::Playing, GamePhase::HitRecovery))
        );
        assert!(!phase.obstacles_enabled());
        assert_eq!(phase.phase_start_time(), 5.0);

        assert_eq!(phase.evaluate(alive_at(6.0, 360.0)), None);
        assert_eq!(
            phase.evaluate(alive_at(6.5, 390.0)),
            Some((GamePhase::HitRecovery, GamePhase::Playing))
        );
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut phase = controller();
        phase.evaluate(alive_at(3.0, 200.0));
        let dead = PhaseInputs {
            damage_applied: true,
            alive: false,
            ..alive_at(4.0, 250.0)
        };
        assert_eq!(
            phase.evaluate(dead),
            Some((GamePhase::Playing, GamePhase::GameOver))
        );
        assert_eq!(phase.evaluate(alive_at(100.0, 9999.0)), None);
        assert!(phase.is_game_over());
    }
}
