//! Health and score reducers

use serde::{Deserialize, Serialize};

use super::events::DomainEvent;

/// Lives remaining; death is terminal for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    pub lives: u32,
    pub alive: bool,
}

impl HealthState {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            alive: lives > 0,
        }
    }

    /// Apply up to `amount` damage; returns what was actually applied
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let applied = amount.min(self.lives);
        self.lives -= applied;
        if self.lives == 0 {
            self.alive = false;
        }
        applied
    }
}

/// Collected value, only ever grows within a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub coins_collected: u64,
}

impl ScoreState {
    /// Add the value of every consumed collectible; returns the gain
    pub fn consume(&mut self, events: &[DomainEvent]) -> u64 {
        let delta: u64 = events
            .iter()
            .map(|event| match event {
                DomainEvent::CollectibleConsumed { value, .. } => *value as u64,
                DomainEvent::Collision { .. } => 0,
            })
            .sum();
        self.coins_collected = self.coins_collected.saturating_add(delta);
        delta
    }
}
