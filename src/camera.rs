#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PITCH, DEFAULT_YAW, DEFAULT_ZOOM};
use crate::model::Aabb;
use crate::placement::{GroundProjector, PlacementError};
use crate::viewport::{CameraRig, ZoomLimits};

/// A point in screen space (CSS pixels) or on the flat drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for the flat pseudo-3D view.
///
/// The world origin is drawn at the viewport center shifted by `pan_x` /
/// `pan_y` (CSS pixels); one world unit spans `zoom` pixels. `pitch` and
/// `yaw` only skew the building volume; placement ignores them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCamera {
    pub pitch: f64,
    pub yaw: f64,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for FlatCamera {
    fn default() -> Self {
        Self {
            pitch: DEFAULT_PITCH,
            yaw: DEFAULT_YAW,
            zoom: DEFAULT_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl FlatCamera {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen position of the world origin.
    #[must_use]
    pub fn origin_on_screen(&self) -> Point {
        Point::new(
            self.viewport_width * 0.5 + self.pan_x,
            self.viewport_height * 0.5 + self.pan_y,
        )
    }

    /// Convert a screen-space point (CSS pixels) to drawing-plane coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let origin = self.origin_on_screen();
        Point {
            x: (screen.x - origin.x) / self.zoom,
            y: (screen.y - origin.y) / self.zoom,
        }
    }

    /// Convert a drawing-plane point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        let origin = self.origin_on_screen();
        Point {
            x: origin.x + world.x * self.zoom,
            y: origin.y + world.y * self.zoom,
        }
    }

    /// Convert a world-space length to screen pixels.
    #[must_use]
    pub fn world_dist_to_screen(&self, world_dist: f64) -> f64 {
        world_dist * self.zoom
    }
}

impl CameraRig for FlatCamera {
    type Transform = FlatCamera;

    fn rotate(&mut self, d_pitch: f64, d_yaw: f64) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
    }

    fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn set_zoom_factor(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn reset(&mut self) {
        *self = Self {
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            ..Self::default()
        };
    }

    fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    fn frame_bounds(&mut self, bounds: &Aabb, margin: f64, limits: &ZoomLimits) {
        let extent = bounds.max_extent();
        if extent <= 0.0 {
            return;
        }
        let fit = self.viewport_width.min(self.viewport_height) / (extent * margin);
        self.zoom = limits.clamp(fit);
        let anchor = flat_anchor(bounds);
        self.pan_x = -anchor.x * self.zoom;
        self.pan_y = -anchor.y * self.zoom;
    }

    fn transform(&self) -> FlatCamera {
        *self
    }
}

impl GroundProjector for FlatCamera {
    /// Affine inverse of the flat projection; never fails.
    fn screen_to_ground(&self, screen: Point) -> Result<DVec3, PlacementError> {
        let world = self.screen_to_world(screen);
        Ok(DVec3::new(world.x, world.y, 0.0))
    }

    fn ground_to_screen(&self, world: DVec3) -> Option<Point> {
        Some(self.world_to_screen(Point::new(world.x, world.y)))
    }
}

/// Drawing-plane point the building volume is anchored at: its footprint center.
#[must_use]
pub fn flat_anchor(bounds: &Aabb) -> Point {
    let center = bounds.center();
    Point::new(center.x, center.z)
}
