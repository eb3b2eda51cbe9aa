//! Path table — derives waypoint sequences once and shares them.

use std::collections::HashMap;
use std::sync::Arc;

use salvo_core::config::PathDescriptor;
use salvo_core::error::ConfigError;
use salvo_core::types::{PathId, WaypointPath};

/// Cache of derived paths keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    paths: HashMap<PathId, Arc<WaypointPath>>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive and cache the waypoints for `id`. Re-registering an id
    /// replaces the cached path; entities already holding the old one keep it.
    pub fn register(
        &mut self,
        id: impl Into<PathId>,
        descriptor: &PathDescriptor,
    ) -> Result<Arc<WaypointPath>, ConfigError> {
        let id = id.into();
        let path = Arc::new(WaypointPath::new(&id, descriptor.world_points())?);
        self.paths.insert(id, Arc::clone(&path));
        Ok(path)
    }

    /// Cached path for `id`.
    ///
    /// # Panics
    /// If `id` was never registered. Wave lists are checked against the
    /// table before a sequencer starts, so this is a logic error.
    pub fn resolve(&self, id: &str) -> Arc<WaypointPath> {
        match self.paths.get(id) {
            Some(path) => Arc::clone(path),
            None => panic!("path `{id}` resolved before it was registered"),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<WaypointPath>> {
        self.paths.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
