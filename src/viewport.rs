//! Viewport controller: turns pointer and wheel input into camera changes.
//!
//! The controller owns the camera (a [`CameraRig`]) and the drag state
//! machine. Both camera variants plug in through the same trait, so the
//! gesture rules (which button rotates, how zoom clamps, what reset means)
//! are written once here.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::Point;
use crate::config::{ConfigError, MAX_ZOOM_VAR, MIN_ZOOM_VAR, ZOOM_SENSITIVITY_VAR};
use crate::consts::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ROTATE_RAD_PER_PX, DEFAULT_ZOOM_SENSITIVITY};
use crate::input::{Button, DragMode, DragState};
use crate::model::Aabb;
use crate::placement::GroundProjector;
use crate::render::ScenePainter;

/// Camera state that a [`ViewportController`] can drive.
///
/// Implementors only apply already-scaled deltas; clamping and gesture
/// bookkeeping live in the controller.
pub trait CameraRig {
    /// Value snapshot of the camera, used for painting and inverse projection.
    type Transform: GroundProjector + ScenePainter;

    /// Add to pitch and yaw, in radians.
    fn rotate(&mut self, d_pitch: f64, d_yaw: f64);

    /// Move the view by a screen-space delta in pixels.
    fn pan(&mut self, dx: f64, dy: f64);

    fn zoom_factor(&self) -> f64;

    fn set_zoom_factor(&mut self, zoom: f64);

    /// Restore the default pose. Viewport size and lens settings are kept.
    fn reset(&mut self);

    /// Update the viewport size in CSS pixels.
    fn set_viewport(&mut self, width: f64, height: f64);

    /// Viewport size in CSS pixels.
    fn viewport(&self) -> (f64, f64);

    /// Point the camera at `bounds` so the whole box is visible.
    fn frame_bounds(&mut self, bounds: &Aabb, margin: f64, limits: &ZoomLimits);

    fn transform(&self) -> Self::Transform;
}

/// Zoom range and wheel sensitivity. Always positive, finite and ordered;
/// [`ZoomLimits::new`] is the only way to build custom limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
    sensitivity: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_ZOOM, max: DEFAULT_MAX_ZOOM, sensitivity: DEFAULT_ZOOM_SENSITIVITY }
    }
}

impl ZoomLimits {
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for a value that is not a finite
    /// positive number and [`ConfigError::ZoomRange`] when `min > max`.
    pub fn new(min: f64, max: f64, sensitivity: f64) -> Result<Self, ConfigError> {
        for (var, value) in [(MIN_ZOOM_VAR, min), (MAX_ZOOM_VAR, max), (ZOOM_SENSITIVITY_VAR, sensitivity)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange { var, value, expected: "positive" });
            }
        }
        if min > max {
            return Err(ConfigError::ZoomRange { min, max });
        }
        Ok(Self { min, max, sensitivity })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Zoom change per wheel delta unit.
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Clamp into the range. NaN maps to `min`.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() { self.min } else { zoom.clamp(self.min, self.max) }
    }
}

/// Gesture tuning for a [`ViewportController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    pub zoom: ZoomLimits,
    /// Radians of pitch/yaw per dragged pixel.
    pub rotate_rad_per_px: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self { zoom: ZoomLimits::default(), rotate_rad_per_px: DEFAULT_ROTATE_RAD_PER_PX }
    }
}

/// Owns the camera and the drag state machine.
#[derive(Debug, Clone)]
pub struct ViewportController<R> {
    rig: R,
    drag: DragState,
    settings: ControlSettings,
}

impl<R: CameraRig> ViewportController<R> {
    #[must_use]
    pub fn new(mut rig: R, settings: ControlSettings) -> Self {
        let zoom = settings.zoom.clamp(rig.zoom_factor());
        rig.set_zoom_factor(zoom);
        Self { rig, drag: DragState::Idle, settings }
    }

    /// Start a drag gesture. Ignored while another drag is active or when
    /// `button` starts no gesture.
    pub fn begin_drag(&mut self, at: Point, button: Button) {
        if self.drag.is_dragging() {
            return;
        }
        let Some(mode) = button.drag_mode() else {
            return;
        };
        tracing::debug!(?mode, x = at.x, y = at.y, "drag started");
        self.drag = DragState::Dragging { mode, last: at };
    }

    /// Apply the pointer delta since the previous event to the camera.
    pub fn continue_drag(&mut self, at: Point) {
        let DragState::Dragging { mode, last } = self.drag else {
            return;
        };
        let dx = at.x - last.x;
        let dy = at.y - last.y;
        match mode {
            DragMode::Rotate => {
                let scale = self.settings.rotate_rad_per_px;
                self.rig.rotate(dy * scale, dx * scale);
            }
            DragMode::Pan => self.rig.pan(dx, dy),
        }
        self.drag = DragState::Dragging { mode, last: at };
    }

    /// End the current drag, if any.
    pub fn end_drag(&mut self) {
        if self.drag.is_dragging() {
            tracing::debug!("drag ended");
        }
        self.drag = DragState::Idle;
    }

    /// Zoom by a wheel delta. Positive deltas (scrolling down) zoom out.
    /// Non-finite deltas are ignored.
    pub fn zoom(&mut self, wheel_delta: f64) {
        if !wheel_delta.is_finite() {
            tracing::debug!(wheel_delta, "non-finite wheel delta ignored");
            return;
        }
        let next = self.rig.zoom_factor() - wheel_delta * self.settings.zoom.sensitivity();
        self.rig.set_zoom_factor(self.settings.zoom.clamp(next));
    }

    /// Restore the default camera pose.
    pub fn reset(&mut self) {
        self.rig.reset();
        let zoom = self.settings.zoom.clamp(self.rig.zoom_factor());
        self.rig.set_zoom_factor(zoom);
    }

    /// Recompute projection parameters for a new viewport size.
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        tracing::debug!(width, height, "viewport resized");
        self.rig.set_viewport(width, height);
    }

    /// Auto-frame the camera around a model's bounding box.
    pub fn frame_bounds(&mut self, bounds: &Aabb, margin: f64) {
        self.rig.frame_bounds(bounds, margin, &self.settings.zoom);
    }

    /// Current camera transform.
    #[must_use]
    pub fn transform(&self) -> R::Transform {
        self.rig.transform()
    }

    /// Viewport size in CSS pixels.
    #[must_use]
    pub fn viewport_size(&self) -> (f64, f64) {
        self.rig.viewport()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub fn rig(&self) -> &R {
        &self.rig
    }

    #[must_use]
    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }
}
