//! Game state and run-scoped systems
//!
//! Everything that persists across frames lives here: the entity registry,
//! the player and its action state, health, score and phase. All of it is
//! built once per run and passed explicitly into [`super::tick`]; there is no
//! ambient global state.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::action::{PlayerActionState, PlayerActions};
use super::bands::SpawnBands;
use super::clock::Clock;
use super::collision::CollisionDetector;
use super::difficulty::{DifficultyCurve, DifficultyState};
use super::lanes::LaneSpace;
use super::phase::{GamePhase, PhaseController};
use super::player::Player;
use super::registry::EntityRegistry;
use super::spawner::{IntervalSpawner, ObstacleSpawner};
use super::vitals::{HealthState, ScoreState};
use crate::error::ConfigError;
use crate::tuning::TuningConfig;

/// Complete run state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Sole source of randomness
    pub rng: Pcg32,
    /// Configuration this run was built from
    pub config: TuningConfig,

    pub clock: Clock,
    pub difficulty: DifficultyCurve,
    pub lanes: LaneSpace,
    pub bands: SpawnBands,
    pub registry: EntityRegistry,
    pub collectible_spawner: IntervalSpawner,
    pub obstacle_spawner: ObstacleSpawner,
    pub player: Player,
    pub actions: PlayerActions,
    pub detector: CollisionDetector,
    pub health: HealthState,
    pub score: ScoreState,
    pub phase: PhaseController,
    /// Runs started with this state (1 after construction)
    pub run_index: u32,
}

impl GameState {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, TuningConfig::default())
    }

    /// New run with custom tuning; rejects invalid configuration up front
    pub fn with_config(seed: u64, config: TuningConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config))
    }

    fn build(seed: u64, config: TuningConfig) -> Self {
        log::info!(
            "Starting run: seed={}, lanes={}, policy={}",
            seed,
            config.lane_count,
            config.obstacle_policy.as_str()
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: Clock::new(),
            difficulty: DifficultyCurve::from_config(&config),
            lanes: LaneSpace::new(config.lane_count, config.lane_width),
            bands: SpawnBands::from_config(&config),
            registry: EntityRegistry::new(),
            collectible_spawner: IntervalSpawner::from_config(&config),
            obstacle_spawner: ObstacleSpawner::from_config(&config),
            player: Player::new(config.start_lane, config.max_jump_height, config.fall_speed),
            actions: PlayerActions::new(config.lane_switch_cooldown_ms),
            detector: CollisionDetector::from_config(&config),
            health: HealthState::new(config.starting_lives),
            score: ScoreState::default(),
            phase: PhaseController::from_config(&config),
            run_index: 1,
            config,
        }
    }

    /// Start a fresh run; the RNG stream and id counter carry on
    pub fn restart(&mut self) {
        self.clock = Clock::new();
        self.bands.reset();
        self.registry.clear();
        self.obstacle_spawner.reset();
        self.player = Player::new(
            self.config.start_lane,
            self.config.max_jump_height,
            self.config.fall_speed,
        );
        self.actions.reset();
        self.health = HealthState::new(self.config.starting_lives);
        self.score = ScoreState::default();
        self.phase.reset();
        self.run_index += 1;
        log::info!("Restarted run #{} (seed {})", self.run_index, self.seed);
    }

    /// Difficulty at the current distance
    pub fn current_difficulty(&self) -> DifficultyState {
        self.difficulty.state_at(self.clock.distance_traveled)
    }

    /// Forward scroll speed at the current distance
    pub fn scroll_speed(&self) -> f32 {
        self.config.base_scroll_speed * self.current_difficulty().speed_multiplier
    }

    /// Stun duration for a collision of the given severity
    pub fn stun_duration_ms(&self, severity: f32) -> f32 {
        self.config.stun_base_ms * (1.0 + severity.max(0.0) * self.config.stun_intensity_scale)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    pub fn lives(&self) -> u32 {
        self.health.lives
    }

    pub fn is_alive(&self) -> bool {
        self.health.alive
    }

    pub fn coins_collected(&self) -> u64 {
        self.score.coins_collected
    }

    pub fn action_state(&self) -> PlayerActionState {
        self.actions.state
    }

    pub fn world_progress(&self) -> f32 {
        self.bands.world_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_in_grace() {
        let state = GameState::new(1);
        assert_eq!(state.phase(), GamePhase::Grace);
        assert_eq!(state.lives(), 3);
        assert_eq!(state.player.lane, 1);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TuningConfig {
            lane_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::with_config(1, config),
            Err(ConfigError::ZeroLanes)
        ));
    }

    #[test]
    fn test_stun_scales_with_severity() {
        let state = GameState::new(1);
        assert_eq!(state.stun_duration_ms(0.0), 600.0);
        assert_eq!(state.stun_duration_ms(1.0), 1200.0);
    }
}
