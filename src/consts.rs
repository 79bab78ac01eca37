//! Shared numeric constants for the siteplan crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the viewport allows by default.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor the viewport allows by default.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

/// Zoom change per wheel delta unit (pixels). Positive wheel delta zooms out.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.001;

// ── Rotation ────────────────────────────────────────────────────

/// Radians of pitch/yaw per dragged pixel.
pub const DEFAULT_ROTATE_RAD_PER_PX: f64 = 0.01;

/// Default camera pitch in radians.
pub const DEFAULT_PITCH: f64 = 0.5;

/// Default camera yaw in radians.
pub const DEFAULT_YAW: f64 = 0.5;

/// Default zoom factor.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Orbit pitch limit in radians (just under 90°), keeps the view from flipping over the pole.
pub const MAX_ORBIT_PITCH: f64 = 1.5;

// ── Orbit lens ──────────────────────────────────────────────────

/// Default vertical field of view for the orbit camera, in degrees.
pub const DEFAULT_FOV_DEG: f64 = 45.0;

/// Default distance from the orbit target at zoom 1.0, in world units.
pub const DEFAULT_ORBIT_DISTANCE: f64 = 400.0;

/// Near clip plane distance.
pub const ORBIT_NEAR: f64 = 0.5;

/// Far clip plane distance.
pub const ORBIT_FAR: f64 = 20_000.0;

/// Rays whose vertical component is below this are treated as parallel to the ground.
pub const GROUND_PARALLEL_EPSILON: f64 = 1e-9;

// ── Framing ─────────────────────────────────────────────────────

/// Extra room left around a freshly loaded model when auto-framing.
pub const DEFAULT_FRAME_MARGIN: f64 = 1.5;

// ── Grid ────────────────────────────────────────────────────────

/// Grid line spacing in world units.
pub const GRID_SPACING: f64 = 30.0;

/// Grid lines drawn on each side of the origin, per axis.
pub const GRID_HALF_LINES: i32 = 20;

// ── Loop ────────────────────────────────────────────────────────

/// Default frame rate for the fixed-rate clock.
pub const DEFAULT_FRAME_RATE: u32 = 60;
