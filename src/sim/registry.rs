//! Entity registry
//!
//! Sole owner of entity lifetime. Entities are stored by id (ordered, so
//! iteration is deterministic) with a secondary index per kind. Nothing else
//! holds an entity across a frame boundary; callers re-query by id.

use std::collections::{BTreeMap, BTreeSet};

use super::bands::{BandName, SpawnBands};
use super::entity::{Entity, EntityId, EntityKind};

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    by_kind: BTreeMap<EntityKind, BTreeSet<EntityId>>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            by_kind: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh entity ID
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an entity under its own id.
    ///
    /// Registering an id twice is a logic error: it panics in debug builds and
    /// keeps the original entity in release builds.
    pub fn register(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        debug_assert!(
            !self.entities.contains_key(&id),
            "entity {id} registered twice"
        );
        if self.entities.contains_key(&id) {
            log::error!("Duplicate registration of entity {}, keeping original", id);
            return id;
        }

        // Keep allocation ahead of any externally chosen id
        if id >= self.next_id {
            self.next_id = id + 1;
        }

        self.by_kind.entry(entity.kind()).or_default().insert(id);
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity; false if it was not registered
    pub fn unregister(&mut self, id: EntityId) -> bool {
        match self.entities.remove(&id) {
            Some(entity) => {
                if let Some(bucket) = self.by_kind.get_mut(&entity.kind()) {
                    bucket.remove(&id);
                }
                true
            }
            None => {
                log::trace!("unregister miss for entity {}", id);
                false
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in id order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entities of one kind, in id order
    pub fn by_type(&self, kind: EntityKind) -> Vec<&Entity> {
        self.by_kind
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.entities.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.by_kind.get(&kind).map_or(0, |ids| ids.len())
    }

    /// Entities whose current z classifies into `band`, in id order
    pub fn by_band(&self, bands: &SpawnBands, band: BandName) -> Vec<&Entity> {
        self.entities
            .values()
            .filter(|e| bands.classify(e.z()) == Some(band))
            .collect()
    }

    /// Run every entity's step
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        for entity in self.entities.values_mut() {
            entity.step(dt, scroll_speed);
        }
    }

    /// Remove everything in (or behind) the recycle band; returns the count removed
    pub fn cleanup(&mut self, bands: &SpawnBands) -> usize {
        let doomed: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| bands.should_recycle(e.z()))
            .map(|e| e.id())
            .collect();

        for id in &doomed {
            self.unregister(*id);
        }
        if !doomed.is_empty() {
            log::debug!("Recycled {} entities", doomed.len());
        }
        doomed.len()
    }

    /// Drop every entity (run restart); ids keep counting up
    pub fn clear(&mut self) {
        self.entities.clear();
        self.by_kind.clear();
    }
}
