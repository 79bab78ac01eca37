//! Perspective orbit camera for the 3D viewport.
//!
//! The camera circles a target point at a distance of `distance / zoom`,
//! parametrized by pitch (elevation above the ground) and yaw (heading
//! around the vertical axis). The ground is the `y = 0` plane.

#[cfg(test)]
#[path = "orbit_test.rs"]
mod orbit_test;

use glam::{DMat4, DVec3, DVec4};

use crate::camera::Point;
use crate::consts::{
    DEFAULT_FOV_DEG, DEFAULT_ORBIT_DISTANCE, DEFAULT_PITCH, DEFAULT_YAW, DEFAULT_ZOOM, GROUND_PARALLEL_EPSILON,
    MAX_ORBIT_PITCH, ORBIT_FAR, ORBIT_NEAR,
};
use crate::model::Aabb;
use crate::placement::{GroundProjector, PlacementError};
use crate::viewport::{CameraRig, ZoomLimits};

/// Lens and default distance for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Distance from the target at zoom 1.0 in the default pose.
    pub base_distance: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self { fov_deg: DEFAULT_FOV_DEG, base_distance: DEFAULT_ORBIT_DISTANCE }
    }
}

/// Orbit camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub pitch: f64,
    pub yaw: f64,
    pub zoom: f64,
    pub target: DVec3,
    /// Distance from the target at zoom 1.0. Auto-framing changes it.
    pub distance: f64,
    pub settings: OrbitSettings,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

impl OrbitCamera {
    #[must_use]
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            pitch: DEFAULT_PITCH,
            yaw: DEFAULT_YAW,
            zoom: DEFAULT_ZOOM,
            target: DVec3::ZERO,
            distance: settings.base_distance,
            settings,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    #[must_use]
    pub fn fov_y(&self) -> f64 {
        self.settings.fov_deg.to_radians()
    }

    /// Current distance from eye to target.
    #[must_use]
    pub fn eye_distance(&self) -> f64 {
        self.distance / self.zoom
    }

    /// World-space eye position.
    #[must_use]
    pub fn eye(&self) -> DVec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        self.target + DVec3::new(cos_p * sin_y, sin_p, cos_p * cos_y) * self.eye_distance()
    }

    fn aspect(&self) -> f64 {
        self.viewport_width.max(1.0) / self.viewport_height.max(1.0)
    }
}

impl CameraRig for OrbitCamera {
    type Transform = OrbitTransform;

    fn rotate(&mut self, d_pitch: f64, d_yaw: f64) {
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_ORBIT_PITCH, MAX_ORBIT_PITCH);
        self.yaw += d_yaw;
    }

    /// Slide the target in the view plane so the ground under it follows the cursor.
    fn pan(&mut self, dx: f64, dy: f64) {
        let world_per_px = 2.0 * self.eye_distance() * (self.fov_y() * 0.5).tan() / self.viewport_height.max(1.0);
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(DVec3::Y).normalize();
        let up = right.cross(forward);
        self.target += (up * dy - right * dx) * world_per_px;
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
            ..Self::new(self.settings)
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
        self.target = bounds.center();
        self.distance = (extent * 0.5) / (self.fov_y() * 0.5).tan() * margin;
        self.zoom = limits.clamp(DEFAULT_ZOOM);
    }

    fn transform(&self) -> OrbitTransform {
        let eye = self.eye();
        let view = DMat4::look_at_rh(eye, self.target, DVec3::Y);
        let proj = DMat4::perspective_rh_gl(self.fov_y(), self.aspect(), ORBIT_NEAR, ORBIT_FAR);
        let view_proj = proj * view;
        OrbitTransform {
            eye,
            target: self.target,
            view_proj,
            inverse_view_proj: view_proj.inverse(),
            viewport_width: self.viewport_width.max(1.0),
            viewport_height: self.viewport_height.max(1.0),
        }
    }
}

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Where the ray meets the `y = 0` ground plane, if it does in front of its origin.
    #[must_use]
    pub fn intersect_ground(&self) -> Option<DVec3> {
        if self.direction.y.abs() < GROUND_PARALLEL_EPSILON {
            return None;
        }
        let t = -self.origin.y / self.direction.y;
        if t < 0.0 {
            return None;
        }
        let hit = self.at(t);
        Some(DVec3::new(hit.x, 0.0, hit.z))
    }
}

/// A world point projected to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Point,
    /// Distance along the view direction; larger is farther away.
    pub depth: f64,
}

/// Snapshot of the orbit camera's matrices and viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTransform {
    pub eye: DVec3,
    pub target: DVec3,
    pub view_proj: DMat4,
    pub inverse_view_proj: DMat4,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl OrbitTransform {
    /// Project a world point to screen space. `None` when it is behind the near plane.
    #[must_use]
    pub fn project(&self, world: DVec3) -> Option<Projected> {
        let clip = self.clip(world);
        (clip.w >= ORBIT_NEAR).then(|| self.clip_to_screen(clip))
    }

    /// Project a segment, cutting it at the near plane. `None` when it lies
    /// entirely behind the near plane.
    #[must_use]
    pub fn project_segment(&self, a: DVec3, b: DVec3) -> Option<(Projected, Projected)> {
        let (ca, cb) = (self.clip(a), self.clip(b));
        match (ca.w >= ORBIT_NEAR, cb.w >= ORBIT_NEAR) {
            (true, true) => Some((self.clip_to_screen(ca), self.clip_to_screen(cb))),
            (false, false) => None,
            (a_in_front, _) => {
                // Clip coordinates are linear along the segment.
                let cut = ca.lerp(cb, (ORBIT_NEAR - ca.w) / (cb.w - ca.w));
                let cut = DVec4::new(cut.x, cut.y, cut.z, ORBIT_NEAR);
                Some(if a_in_front {
                    (self.clip_to_screen(ca), self.clip_to_screen(cut))
                } else {
                    (self.clip_to_screen(cut), self.clip_to_screen(cb))
                })
            }
        }
    }

    fn clip(&self, world: DVec3) -> DVec4 {
        self.view_proj * DVec4::new(world.x, world.y, world.z, 1.0)
    }

    fn clip_to_screen(&self, clip: DVec4) -> Projected {
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Projected {
            screen: Point::new(
                (ndc_x + 1.0) * 0.5 * self.viewport_width,
                (1.0 - ndc_y) * 0.5 * self.viewport_height,
            ),
            depth: clip.w,
        }
    }

    /// Ray from the near plane through a screen point.
    #[must_use]
    pub fn screen_to_ray(&self, screen: Point) -> Ray {
        let ndc_x = screen.x / self.viewport_width * 2.0 - 1.0;
        let ndc_y = 1.0 - screen.y / self.viewport_height * 2.0;
        let near = self.inverse_view_proj.project_point3(DVec3::new(ndc_x, ndc_y, -1.0));
        let far = self.inverse_view_proj.project_point3(DVec3::new(ndc_x, ndc_y, 1.0));
        Ray { origin: near, direction: (far - near).normalize() }
    }
}

impl GroundProjector for OrbitTransform {
    fn screen_to_ground(&self, screen: Point) -> Result<DVec3, PlacementError> {
        self.screen_to_ray(screen)
            .intersect_ground()
            .ok_or(PlacementError::NoGroundIntersection)
    }

    fn ground_to_screen(&self, world: DVec3) -> Option<Point> {
        self.project(world).map(|p| p.screen)
    }
}
