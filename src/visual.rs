//! Retained visuals: the drawable that stands for a placed object on screen.
//!
//! A [`VisualHandle`] is neither `Clone` nor `Copy`, so exactly one owner can
//! hold it and detaching consumes it.

#[cfg(test)]
#[path = "visual_test.rs"]
mod visual_test;

use std::collections::HashMap;

use glam::DVec3;

use crate::recipe::Geometry;

/// Exclusive reference to a visual in a [`VisualStore`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(u64);

impl VisualHandle {
    #[must_use]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A drawable: geometry placed at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub geometry: Geometry,
    pub position: DVec3,
}

/// Owns every live visual on the render target.
#[derive(Debug, Default)]
pub struct VisualStore {
    visuals: HashMap<u64, Visual>,
    next: u64,
}

impl VisualStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visual and hand back its only handle.
    pub fn attach(&mut self, geometry: Geometry, position: DVec3) -> VisualHandle {
        let raw = self.next;
        self.next += 1;
        self.visuals.insert(raw, Visual { geometry, position });
        VisualHandle(raw)
    }

    /// Dispose a visual. Returns the visual that was attached, if any.
    pub fn detach(&mut self, handle: VisualHandle) -> Option<Visual> {
        self.visuals.remove(&handle.0)
    }

    #[must_use]
    pub fn get(&self, handle: &VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle.0)
    }

    #[must_use]
    pub fn is_live(&self, handle: &VisualHandle) -> bool {
        self.visuals.contains_key(&handle.0)
    }

    /// Number of live visuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}
