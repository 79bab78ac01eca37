//! Input model: mouse buttons, drag modes, and the drag state machine.
//!
//! `DragState` is the gesture tracked between pointer-down and pointer-up.
//! It only ever carries the previous pointer position; every camera change
//! is applied incrementally as the pointer moves.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger drag).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger drag).
    Secondary,
}

impl Button {
    /// The drag mode this button starts, if any.
    #[must_use]
    pub fn drag_mode(self) -> Option<DragMode> {
        match self {
            Self::Primary => Some(DragMode::Rotate),
            Self::Secondary => Some(DragMode::Pan),
            Self::Middle => None,
        }
    }
}

/// What a drag gesture does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Adjust pitch and yaw proportionally to the pointer delta.
    Rotate,
    /// Move the view with the pointer.
    Pan,
}

/// Gesture state of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A drag is active.
    Dragging {
        /// Which camera adjustment the drag performs.
        mode: DragMode,
        /// Screen-space position of the previous pointer event, used to compute deltas.
        last: Point,
    },
}

impl DragState {
    /// Whether a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The active drag mode, if dragging.
    #[must_use]
    pub fn mode(&self) -> Option<DragMode> {
        match self {
            Self::Idle => None,
            Self::Dragging { mode, .. } => Some(*mode),
        }
    }
}
