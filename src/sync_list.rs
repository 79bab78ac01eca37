//! The placed-equipment list, kept in step with the scene registry.
//!
//! `PlacedList` never holds objects of its own. It registers a change
//! listener and rebuilds its rows from the registry's slice every time,
//! so it can only ever show what the registry holds. Removing through the
//! list goes back through the registry like any other removal.

#[cfg(test)]
#[path = "sync_list_test.rs"]
mod sync_list_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::recipe::EquipmentKind;
use crate::scene::{ListenerId, ObjectId, PlacedObject, SceneRegistry};

/// One line of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: ObjectId,
    pub kind: EquipmentKind,
    /// Display name, e.g. `Tower crane`.
    pub label: &'static str,
    /// e.g. `6 months`.
    pub duration_text: String,
}

impl ListRow {
    fn from_object(obj: &PlacedObject) -> Self {
        Self {
            id: obj.id(),
            kind: obj.kind(),
            label: obj.kind().display_name(),
            duration_text: duration_text(obj.duration_months()),
        }
    }
}

/// `"1 month"`, otherwise `"N months"`.
#[must_use]
pub fn duration_text(months: u32) -> String {
    if months == 1 { "1 month".to_string() } else { format!("{months} months") }
}

fn rows_for(objects: &[PlacedObject]) -> Vec<ListRow> {
    objects.iter().map(ListRow::from_object).collect()
}

/// Passive view of the registry as list rows.
#[derive(Debug)]
pub struct PlacedList {
    rows: Rc<RefCell<Vec<ListRow>>>,
    listener: ListenerId,
}

impl PlacedList {
    /// Mirror `registry`, starting from what it already holds.
    pub fn attach(registry: &mut SceneRegistry) -> Self {
        let rows = Rc::new(RefCell::new(rows_for(registry.all())));
        let sink = Rc::clone(&rows);
        let listener = registry.on_change(move |objects| {
            *sink.borrow_mut() = rows_for(objects);
        });
        Self { rows, listener }
    }

    /// Current rows, in registry order.
    #[must_use]
    pub fn rows(&self) -> Vec<ListRow> {
        self.rows.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    /// The remove control of a row. The row disappears when the registry
    /// notifies, not before.
    pub fn remove(&self, id: ObjectId, registry: &mut SceneRegistry) -> bool {
        registry.remove_by_id(id)
    }

    /// Stop mirroring `registry`. Rows keep their last contents.
    pub fn detach(&self, registry: &mut SceneRegistry) -> bool {
        registry.remove_listener(self.listener)
    }
}
