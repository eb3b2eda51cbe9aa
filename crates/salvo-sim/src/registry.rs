//! Entity registry — the hecs world plus the host-handle index.
//!
//! Every live enemy appears in both. Release removes it from both and
//! notifies the host in one call, so a second release of the same entity
//! is a no-op and the host sees exactly one `destroy` per handle.

use std::collections::HashMap;

use hecs::{DynamicBundle, Entity, World};

use salvo_core::components::{Enemy, Health, HostHandle};
use salvo_core::host::EntityHost;
use salvo_core::types::{EnemyKindId, EntityHandle};

/// What was removed by a successful release.
#[derive(Debug, Clone)]
pub struct Released {
    pub handle: EntityHandle,
    pub kind: EnemyKindId,
    pub score_value: u32,
}

#[derive(Default)]
pub struct EntityRegistry {
    world: World,
    by_handle: HashMap<EntityHandle, Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `components` and index it under `handle`.
    pub fn insert(&mut self, handle: EntityHandle, components: impl DynamicBundle) -> Entity {
        let entity = self.world.spawn(components);
        self.by_handle.insert(handle, entity);
        entity
    }

    /// Live entity for a host handle, if any.
    pub fn entity(&self, handle: EntityHandle) -> Option<Entity> {
        self.by_handle.get(&handle).copied()
    }

    /// Remove `entity` from the world and the index, then tell the host.
    /// Returns `None` if it was already released.
    pub fn release(&mut self, entity: Entity, host: &mut dyn EntityHost) -> Option<Released> {
        let handle = self.world.get::<&HostHandle>(entity).ok()?.0;
        let kind = self
            .world
            .get::<&Enemy>(entity)
            .map(|enemy| enemy.kind.clone())
            .unwrap_or_default();
        let score_value = self
            .world
            .get::<&Health>(entity)
            .map(|health| health.score_value)
            .unwrap_or(0);

        self.world.despawn(entity).ok()?;
        self.by_handle.remove(&handle);
        host.destroy(handle);

        Some(Released {
            handle,
            kind,
            score_value,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}
