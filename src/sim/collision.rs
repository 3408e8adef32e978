//! Collision detection and resolution
//!
//! Detection only ever looks at the active band: an entity anywhere else can
//! never produce a hit, early or late. Hits are swept over the distance the
//! world scrolled this frame, so a long frame cannot carry an entity across
//! the hit window unseen. Resolution turns raw candidates into
//! [`DomainEvent`]s, at most one per entity, re-checking liveness against the
//! registry before emitting anything.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::bands::{BandName, SpawnBands};
use super::entity::{Entity, EntityId, EntityKind};
use super::events::DomainEvent;
use super::player::Player;
use super::registry::EntityRegistry;
use crate::tuning::TuningConfig;

/// Raw hit reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionCandidate {
    pub entity_id: EntityId,
    pub kind: EntityKind,
    pub lane: u32,
    /// Absolute longitudinal distance at contact
    pub distance: f32,
}

/// Distance limits for a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionThresholds {
    pub obstacle: f32,
    pub collectible: f32,
    /// Max vertical separation
    pub height: f32,
}

impl CollisionThresholds {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            obstacle: config.obstacle_hit_distance,
            collectible: config.collectible_hit_distance,
            height: config.height_threshold,
        }
    }

    pub fn for_kind(&self, kind: EntityKind) -> f32 {
        match kind {
            EntityKind::Obstacle => self.obstacle,
            EntityKind::Collectible => self.collectible,
        }
    }
}

/// Start-of-run window in which nothing collides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraceWindow {
    pub secs: f32,
    pub distance: f32,
}

impl GraceWindow {
    /// Still in grace until both the time and the distance thresholds are met
    pub fn is_active(&self, elapsed_secs: f32, world_progress: f32) -> bool {
        elapsed_secs < self.secs || world_progress < self.distance
    }
}

/// Per-frame inputs to detection that come from outside the registry
#[derive(Debug, Clone, Copy)]
pub struct DetectContext {
    pub elapsed_secs: f32,
    /// Whether obstacles may produce candidates (phase gate)
    pub obstacles_enabled: bool,
    /// Distance every entity moved toward the player this frame
    pub sweep: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionDetector {
    pub thresholds: CollisionThresholds,
    pub grace: GraceWindow,
}

impl CollisionDetector {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            thresholds: CollisionThresholds::from_config(config),
            grace: GraceWindow {
                secs: config.grace_secs,
                distance: config.grace_distance,
            },
        }
    }

    /// Candidate hits for this frame, in entity id order
    pub fn detect(
        &self,
        player: &Player,
        registry: &EntityRegistry,
        bands: &SpawnBands,
        ctx: DetectContext,
    ) -> Vec<CollisionCandidate> {
        if self.grace.is_active(ctx.elapsed_secs, bands.world_progress()) {
            return Vec::new();
        }

        registry
            .by_band(bands, BandName::Active)
            .into_iter()
            .filter(|e| ctx.obstacles_enabled || e.kind() != EntityKind::Obstacle)
            .filter_map(|e| self.check(player, e, ctx.sweep))
            .collect()
    }

    fn check(
        &self,
        player: &Player,
        entity: &Entity,
        sweep: f32,
    ) -> Option<CollisionCandidate> {
        if entity.lane() != player.lane {
            return None;
        }
        // Span covered this frame: from `far` (frame start) down to `near` (now)
        let threshold = self.thresholds.for_kind(entity.kind());
        let near = entity.z() - player.z();
        let far = near + sweep.max(0.0);
        if near > threshold || far < -threshold {
            return None;
        }
        let distance = if near <= 0.0 && far >= 0.0 {
            0.0
        } else {
            near.abs().min(far.abs())
        };
        if (entity.y() - player.y).abs() > self.thresholds.height {
            return None;
        }
        Some(CollisionCandidate {
            entity_id: entity.id(),
            kind: entity.kind(),
            lane: entity.lane(),
            distance,
        })
    }
}

/// Severity in [0, multiplier]: 1.0 at dead center, 0.0 at the threshold edge
pub fn severity_for(distance: f32, threshold: f32, multiplier: f32) -> f32 {
    if threshold <= 0.0 {
        return multiplier;
    }
    (1.0 - distance / threshold).clamp(0.0, 1.0) * multiplier
}

/// Turn candidates into events, exactly once per live entity.
///
/// Collectibles are unregistered here. Obstacles stay registered so same-frame
/// consumers can still see them; health resolution removes them.
pub fn resolve(
    candidates: &[CollisionCandidate],
    registry: &mut EntityRegistry,
    thresholds: &CollisionThresholds,
    severity_multiplier: f32,
) -> Vec<DomainEvent> {
    let mut seen: BTreeSet<EntityId> = BTreeSet::new();
    let mut events = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if !seen.insert(candidate.entity_id) {
            continue;
        }
        // Liveness re-check: anything recycled or consumed earlier is skipped
        let Some(entity) = registry.get(candidate.entity_id) else {
            log::debug!("Skipping stale candidate {}", candidate.entity_id);
            continue;
        };

        match entity {
            Entity::Collectible(c) => {
                let event = DomainEvent::CollectibleConsumed {
                    entity_id: c.id,
                    lane: c.lane,
                    value: c.value,
                };
                registry.unregister(candidate.entity_id);
                events.push(event);
            }
            Entity::Obstacle(o) => {
                let severity =
                    severity_for(candidate.distance, thresholds.obstacle, severity_multiplier);
                events.push(DomainEvent::Collision {
                    entity_id: o.id,
                    lane: o.lane,
                    severity,
                });
            }
        }
    }

    events
}
