//! Player action gating
//!
//! A small state machine deciding which intents the player may execute right
//! now. The lane controller must ask [`PlayerActions::can_execute`] before it
//! moves the player; the gate is not advisory.

use serde::{Deserialize, Serialize};

/// Kind of intent being gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentKind {
    LaneChange,
    Vertical,
}

/// Exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerActionState {
    Ready,
    LaneSwitchCooldown { remaining_ms: f32 },
    Stunned { remaining_ms: f32 },
}

impl PlayerActionState {
    pub fn can_execute(&self, intent: IntentKind) -> bool {
        match self {
            PlayerActionState::Ready => true,
            PlayerActionState::LaneSwitchCooldown { .. } => intent != IntentKind::LaneChange,
            PlayerActionState::Stunned { .. } => false,
        }
    }

    pub fn is_stunned(&self) -> bool {
        matches!(self, PlayerActionState::Stunned { .. })
    }
}

/// Action state plus this frame's pending stun requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerActions {
    pub state: PlayerActionState,
    pub lane_switch_cooldown_ms: f32,
    /// Largest stun requested this frame, applied once by [`Self::commit_stun`]
    #[serde(skip)]
    pending_stun_ms: Option<f32>,
}

impl PlayerActions {
    pub fn new(lane_switch_cooldown_ms: f32) -> Self {
        Self {
            state: PlayerActionState::Ready,
            lane_switch_cooldown_ms,
            pending_stun_ms: None,
        }
    }

    pub fn can_execute(&self, intent: IntentKind) -> bool {
        self.state.can_execute(intent)
    }

    /// Count down the active timer; expiry returns to Ready
    pub fn tick(&mut self, dt_ms: f32) {
        self.state = match self.state {
            PlayerActionState::Ready => PlayerActionState::Ready,
            PlayerActionState::LaneSwitchCooldown { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    PlayerActionState::Ready
                } else {
                    PlayerActionState::LaneSwitchCooldown { remaining_ms }
                }
            }
            PlayerActionState::Stunned { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    log::debug!("Stun expired");
                    PlayerActionState::Ready
                } else {
                    PlayerActionState::Stunned { remaining_ms }
                }
            }
        };
    }

    /// Record that a lane change was executed (Ready -> cooldown)
    pub fn lane_changed(&mut self) {
        if self.state == PlayerActionState::Ready {
            self.state = PlayerActionState::LaneSwitchCooldown {
                remaining_ms: self.lane_switch_cooldown_ms,
            };
        }
    }

    /// Queue a stun; same-frame requests collapse to the maximum duration
    pub fn request_stun(&mut self, duration_ms: f32) {
        if duration_ms <= 0.0 {
            return;
        }
        self.pending_stun_ms = Some(match self.pending_stun_ms {
            Some(current) => current.max(duration_ms),
            None => duration_ms,
        });
    }

    /// Apply the queued stun once, replacing any timer in progress
    pub fn commit_stun(&mut self) -> Option<f32> {
        let duration_ms = self.pending_stun_ms.take()?;
        log::debug!("Stunned for {:.0}ms (was {:?})", duration_ms, self.state);
        self.state = PlayerActionState::Stunned {
            remaining_ms: duration_ms,
        };
        Some(duration_ms)
    }

    pub fn reset(&mut self) {
        self.state = PlayerActionState::Ready;
        self.pending_stun_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_by_state() {
        let ready = PlayerActionState::Ready;
        let cooling = PlayerActionState::LaneSwitchCooldown { remaining_ms: 50.0 };
        let stunned = PlayerActionState::Stunned { remaining_ms: 50.0 };

        assert!(ready.can_execute(IntentKind::LaneChange));
        assert!(ready.can_execute(IntentKind::Vertical));
        assert!(!cooling.can_execute(IntentKind::LaneChange));
        assert!(cooling.can_execute(IntentKind::Vertical));
        assert!(!stunned.can_execute(IntentKind::LaneChange));
        assert!(!stunned.can_execute(IntentKind::Vertical));
    }

    #[test]
    fn test_cooldown_expires_to_ready() {
        let mut actions = PlayerActions::new(100.0);
        actions.lane_changed();
        assert_eq!(
            actions.state,
            PlayerActionState::LaneSwitchCooldown { remaining_ms: 100.0 }
        );
        actions.tick(60.0);
        assert!(!actions.can_execute(IntentKind::LaneChange));
        actions.tick(40.0);
        assert_eq!(actions.state, PlayerActionState::Ready);
    }

    #[test]
    fn test_stun_replaces_cooldown() {
        let mut actions = PlayerActions::new(100.0);
        actions.lane_changed();
        actions.request_stun(500.0);
        assert_eq!(actions.commit_stun(), Some(500.0));
        assert_eq!(
            actions.state,
            PlayerActionState::Stunned { remaining_ms: 500.0 }
        );
    }

    #[test]
    fn test_restun_replaces_not_sums() {
        let mut actions = PlayerActions::new(100.0);
        actions.request_stun(500.0);
        actions.commit_stun();
        actions.tick(400.0);
        actions.request_stun(300.0);
        actions.commit_stun();
        assert_eq!(
            actions.state,
            PlayerActionState::Stunned { remaining_ms: 300.0 }
        );
    }

    #[test]
    fn test_same_frame_stuns_take_max() {
        let mut actions = PlayerActions::new(100.0);
        actions.request_stun(300.0);
        actions.request_stun(900.0);
        actions.request_stun(450.0);
        assert_eq!(actions.commit_stun(), Some(900.0));
        // Applied once: nothing left pending
        assert_eq!(actions.commit_stun(), None);
    }

    #[test]
    fn test_lane_change_ignored_unless_ready() {
        let mut actions = PlayerActions::new(100.0);
        actions.request_stun(200.0);
        actions.commit_stun();
        actions.lane_changed();
        assert!(actions.state.is_stunned());
    }
}
