//! Scene model: placed objects and the ordered registry that owns them.
//!
//! `SceneRegistry` is the single source of truth for what is on site. It
//! keeps objects in insertion order (which is also display order), owns the
//! [`VisualStore`] their visuals live in, and tells listeners after every
//! change. Listeners only ever see `&[PlacedObject]`, so they cannot mutate
//! the registry while it is notifying.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use glam::DVec3;
use uuid::Uuid;

use crate::recipe::EquipmentKind;
use crate::visual::{VisualHandle, VisualStore};

/// Unique identifier for a placed object. UUID v7, so ids sort by creation time.
pub type ObjectId = Uuid;

/// A piece of equipment placed on site.
#[derive(Debug)]
pub struct PlacedObject {
    id: ObjectId,
    kind: EquipmentKind,
    duration_months: u32,
    position: DVec3,
    visual: VisualHandle,
}

impl PlacedObject {
    /// Wrap an attached visual. The caller mints `id`; it must be fresh.
    #[must_use]
    pub fn new(id: ObjectId, kind: EquipmentKind, duration_months: u32, position: DVec3, visual: VisualHandle) -> Self {
        Self { id, kind, duration_months, position, visual }
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> EquipmentKind {
        self.kind
    }

    /// How long the equipment stays on site. Metadata only; geometry ignores it.
    #[must_use]
    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    #[must_use]
    pub fn visual(&self) -> &VisualHandle {
        &self.visual
    }
}

/// Token returned by [`SceneRegistry::on_change`], used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&[PlacedObject])>;

/// Ordered store of placed objects and their visuals.
#[derive(Default)]
pub struct SceneRegistry {
    entries: Vec<PlacedObject>,
    visuals: VisualStore,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl SceneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The visual store objects attach to before insertion.
    pub fn visuals_mut(&mut self) -> &mut VisualStore {
        &mut self.visuals
    }

    #[must_use]
    pub fn visuals(&self) -> &VisualStore {
        &self.visuals
    }

    /// Append an object and notify listeners. Returns the stored entry.
    pub fn insert(&mut self, obj: PlacedObject) -> &PlacedObject {
        debug_assert!(!self.contains(obj.id), "duplicate object id {}", obj.id);
        debug_assert!(self.visuals.is_live(&obj.visual), "object {} has no live visual", obj.id);
        let index = self.entries.len();
        self.entries.push(obj);
        self.notify();
        &self.entries[index]
    }

    /// Remove an object by id, disposing its visual first. Absent ids are a no-op.
    ///
    /// Returns `true` if something was removed.
    pub fn remove_by_id(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.entries.iter().position(|o| o.id == id) else {
            return false;
        };
        let obj = self.entries.remove(index);
        self.visuals.detach(obj.visual);
        self.notify();
        true
    }

    /// Current objects in insertion order.
    #[must_use]
    pub fn all(&self) -> &[PlacedObject] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.entries.iter().find(|o| o.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a change listener. Listeners run in registration order,
    /// synchronously, after every successful insert or removal.
    pub fn on_change(&mut self, listener: impl FnMut(&[PlacedObject]) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detach every listener and dispose every object's visual. Listeners are
    /// not told about the objects disappearing.
    pub fn clear(&mut self) {
        self.listeners.clear();
        for obj in self.entries.drain(..) {
            self.visuals.detach(obj.visual);
        }
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.entries);
        }
    }
}
