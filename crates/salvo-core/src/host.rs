//! Collaborator interfaces the orchestration calls out to.
//!
//! The simulation owns entity lifecycles but not their presentation:
//! an [`EntityHost`] mirrors creation and destruction, a
//! [`TargetProvider`] answers "where is the player", and a
//! [`BoundsProvider`] answers "where is the play area".

use std::sync::{Arc, Mutex};

use glam::DVec2;

use crate::types::{Bounds, EnemyKindId, EntityHandle};

/// Entity instantiation, destruction and firing control.
pub trait EntityHost {
    /// Instantiate a presentation entity and return its handle.
    fn create(&mut self, kind: &EnemyKindId, position: DVec2, rotation: f64) -> EntityHandle;

    /// Release a handle. Called exactly once per created handle.
    fn destroy(&mut self, handle: EntityHandle);

    /// Turn continuous firing on or off.
    fn set_firing(&mut self, handle: EntityHandle, firing: bool);
}

/// Current target query. `None` means no target right now.
pub trait TargetProvider {
    fn current_target(&self) -> Option<DVec2>;
}

/// Play area query. `None` disables bounds-based cleanup.
pub trait BoundsProvider {
    fn bounds(&self) -> Option<Bounds>;
}

/// Target provider handle stored on tracking entities.
pub type SharedTargetProvider = Arc<dyn TargetProvider + Send + Sync>;

/// Host that only hands out sequential handles.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_handle: u64,
    live: usize,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles created and not yet destroyed.
    pub fn live(&self) -> usize {
        self.live
    }
}

impl EntityHost for HeadlessHost {
    fn create(&mut self, _kind: &EnemyKindId, _position: DVec2, _rotation: f64) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.live += 1;
        handle
    }

    fn destroy(&mut self, _handle: EntityHandle) {
        self.live = self.live.saturating_sub(1);
    }

    fn set_firing(&mut self, _handle: EntityHandle, _firing: bool) {}
}

/// Target position shared between the simulation and whoever moves the player.
#[derive(Debug, Clone, Default)]
pub struct SharedTarget {
    position: Arc<Mutex<Option<DVec2>>>,
}

impl SharedTarget {
    pub fn new(position: Option<DVec2>) -> Self {
        Self {
            position: Arc::new(Mutex::new(position)),
        }
    }

    pub fn set(&self, position: Option<DVec2>) {
        if let Ok(mut lock) = self.position.lock() {
            *lock = position;
        }
    }
}

impl TargetProvider for SharedTarget {
    fn current_target(&self) -> Option<DVec2> {
        self.position.lock().ok().and_then(|lock| *lock)
    }
}

/// Fixed play area.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBounds(pub Option<Bounds>);

impl BoundsProvider for StaticBounds {
    fn bounds(&self) -> Option<Bounds> {
        self.0
    }
}
