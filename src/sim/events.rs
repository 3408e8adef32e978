//! Frame-scoped domain events
//!
//! Produced by collision resolution, consumed by health/score and handed to
//! presentation in the same frame, then dropped. Never carried over.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DomainEvent {
    /// The player touched an obstacle
    Collision {
        entity_id: EntityId,
        lane: u32,
        severity: f32,
    },
    /// The player picked up a collectible
    CollectibleConsumed {
        entity_id: EntityId,
        lane: u32,
        value: u32,
    },
}

impl DomainEvent {
    pub fn entity_id(&self) -> EntityId {
        match self {
            DomainEvent::Collision { entity_id, .. }
            | DomainEvent::CollectibleConsumed { entity_id, .. } => *entity_id,
        }
    }

    pub fn lane(&self) -> u32 {
        match self {
            DomainEvent::Collision { lane, .. } | DomainEvent::CollectibleConsumed { lane, .. } => {
                *lane
            }
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, DomainEvent::Collision { .. })
    }
}
