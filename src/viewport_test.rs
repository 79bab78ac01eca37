#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::FlatCamera;
use crate::consts::{DEFAULT_PITCH, DEFAULT_YAW, DEFAULT_ZOOM, MAX_ORBIT_PITCH};
use crate::orbit::OrbitCamera;
use glam::DVec3;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn flat_controller() -> ViewportController<FlatCamera> {
    let mut vc = ViewportController::new(FlatCamera::default(), ControlSettings::default());
    vc.resize(800.0, 600.0);
    vc
}

fn orbit_controller() -> ViewportController<OrbitCamera> {
    let mut vc = ViewportController::new(OrbitCamera::default(), ControlSettings::default());
    vc.resize(800.0, 600.0);
    vc
}

// =============================================================
// Drag state machine
// =============================================================

#[test]
fn starts_idle() {
    assert_eq!(flat_controller().drag_state(), DragState::Idle);
}

#[test]
fn primary_starts_rotate_secondary_starts_pan() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(10.0, 10.0), Button::Primary);
    assert_eq!(vc.drag_state().mode(), Some(DragMode::Rotate));
    vc.end_drag();
    vc.begin_drag(Point::new(10.0, 10.0), Button::Secondary);
    assert_eq!(vc.drag_state().mode(), Some(DragMode::Pan));
}

#[test]
fn middle_button_starts_nothing() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(10.0, 10.0), Button::Middle);
    assert_eq!(vc.drag_state(), DragState::Idle);
}

#[test]
fn begin_while_dragging_is_ignored() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(10.0, 10.0), Button::Primary);
    vc.begin_drag(Point::new(50.0, 50.0), Button::Secondary);
    assert_eq!(
        vc.drag_state(),
        DragState::Dragging { mode: DragMode::Rotate, last: Point::new(10.0, 10.0) }
    );
}

#[test]
fn begin_continue_end_returns_to_idle() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(0.0, 0.0), Button::Primary);
    vc.continue_drag(Point::new(5.0, 5.0));
    vc.continue_drag(Point::new(9.0, 2.0));
    vc.end_drag();
    assert_eq!(vc.drag_state(), DragState::Idle);
    vc.end_drag();
    assert_eq!(vc.drag_state(), DragState::Idle);
}

#[test]
fn continue_without_drag_changes_nothing() {
    let mut vc = flat_controller();
    let before = *vc.rig();
    vc.continue_drag(Point::new(100.0, 100.0));
    assert_eq!(*vc.rig(), before);
}

#[test]
fn continue_updates_last_point() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(0.0, 0.0), Button::Secondary);
    vc.continue_drag(Point::new(7.0, 3.0));
    assert_eq!(
        vc.drag_state(),
        DragState::Dragging { mode: DragMode::Pan, last: Point::new(7.0, 3.0) }
    );
}

// =============================================================
// Rotate / pan
// =============================================================

#[test]
fn rotate_drag_scales_delta() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(100.0, 100.0), Button::Primary);
    vc.continue_drag(Point::new(120.0, 90.0));
    assert!(approx_eq(vc.rig().yaw, DEFAULT_YAW + 20.0 * 0.01));
    assert!(approx_eq(vc.rig().pitch, DEFAULT_PITCH - 10.0 * 0.01));
}

#[test]
fn rotate_is_incremental_across_moves() {
    let mut one = flat_controller();
    one.begin_drag(Point::new(0.0, 0.0), Button::Primary);
    one.continue_drag(Point::new(30.0, 30.0));

    let mut many = flat_controller();
    many.begin_drag(Point::new(0.0, 0.0), Button::Primary);
    for step in 1..=3 {
        let v = f64::from(step) * 10.0;
        many.continue_drag(Point::new(v, v));
    }
    assert!(approx_eq(one.rig().yaw, many.rig().yaw));
    assert!(approx_eq(one.rig().pitch, many.rig().pitch));
}

#[test]
fn flat_pan_adds_raw_pixels() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(100.0, 100.0), Button::Secondary);
    vc.continue_drag(Point::new(130.0, 80.0));
    assert_eq!(vc.rig().pan_x, 30.0);
    assert_eq!(vc.rig().pan_y, -20.0);
}

#[test]
fn orbit_pitch_stays_clamped() {
    let mut vc = orbit_controller();
    vc.begin_drag(Point::new(0.0, 0.0), Button::Primary);
    vc.continue_drag(Point::new(0.0, 10_000.0));
    assert_eq!(vc.rig().pitch, MAX_ORBIT_PITCH);
    vc.continue_drag(Point::new(0.0, -10_000.0));
    assert_eq!(vc.rig().pitch, -MAX_ORBIT_PITCH);
}

#[test]
fn orbit_pan_moves_target_in_view_plane() {
    let mut vc = orbit_controller();
    vc.begin_drag(Point::new(400.0, 300.0), Button::Secondary);
    vc.continue_drag(Point::new(450.0, 300.0));
    let target = vc.rig().target;
    assert!(target.length() > 0.0);
    assert!(approx_eq(target.y, 0.0));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn wheel_down_zooms_out() {
    let mut vc = flat_controller();
    vc.zoom(100.0);
    assert!(approx_eq(vc.rig().zoom, 0.9));
    vc.zoom(-200.0);
    assert!(approx_eq(vc.rig().zoom, 1.1));
}

#[test]
fn zoom_stays_within_limits_for_any_sequence() {
    let deltas = [5_000.0, -1.0, -90_000.0, 3.5, 250.0, -0.25, 1e12, -1e12, 0.0, 42.0];
    let mut vc = flat_controller();
    for (i, d) in deltas.iter().cycle().take(200).enumerate() {
        let d = if i % 3 == 0 { -d } else { *d };
        vc.zoom(d);
        let z = vc.rig().zoom;
        assert!((0.1..=3.0).contains(&z), "zoom {z} escaped after delta {d}");
    }
}

#[test]
fn zoom_is_deterministic() {
    let mut a = flat_controller();
    let mut b = flat_controller();
    for d in [120.0, -40.0, 3.0] {
        a.zoom(d);
        b.zoom(d);
    }
    assert_eq!(a.rig().zoom, b.rig().zoom);
}

#[test]
fn new_clamps_out_of_range_zoom() {
    let cam = FlatCamera { zoom: 50.0, ..FlatCamera::default() };
    let vc = ViewportController::new(cam, ControlSettings::default());
    assert_eq!(vc.rig().zoom, 3.0);
}

#[test]
fn custom_limits_are_respected() {
    let settings = ControlSettings {
        zoom: ZoomLimits::new(0.5, 1.5, 0.01).unwrap(),
        ..ControlSettings::default()
    };
    let mut vc = ViewportController::new(FlatCamera::default(), settings);
    vc.zoom(-1_000.0);
    assert_eq!(vc.rig().zoom, 1.5);
    vc.zoom(1_000.0);
    assert_eq!(vc.rig().zoom, 0.5);
}

#[test]
fn zoom_ignores_non_finite_delta() {
    let mut vc = flat_controller();
    vc.zoom(-200.0);
    let before = vc.rig().zoom;
    for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        vc.zoom(delta);
        assert_eq!(vc.rig().zoom, before);
    }
    vc.zoom(100.0);
    assert!((0.1..=3.0).contains(&vc.rig().zoom));
}

#[test]
fn new_replaces_nan_zoom_with_minimum() {
    let cam = FlatCamera { zoom: f64::NAN, ..FlatCamera::default() };
    let vc = ViewportController::new(cam, ControlSettings::default());
    assert_eq!(vc.rig().zoom, 0.1);
}

#[test]
fn inverted_limits_are_rejected() {
    assert_eq!(ZoomLimits::new(3.0, 0.1, 0.001), Err(ConfigError::ZoomRange { min: 3.0, max: 0.1 }));
}

#[test]
fn non_positive_or_non_finite_limits_are_rejected() {
    for (min, max, sensitivity) in [(0.0, 3.0, 0.001), (0.1, f64::INFINITY, 0.001), (0.1, 3.0, f64::NAN), (0.1, 3.0, -1.0)] {
        let err = ZoomLimits::new(min, max, sensitivity).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }), "{err:?}");
    }
}

#[test]
fn equal_limits_pin_zoom() {
    let settings = ControlSettings { zoom: ZoomLimits::new(2.0, 2.0, 0.01).unwrap(), ..ControlSettings::default() };
    let mut vc = ViewportController::new(FlatCamera::default(), settings);
    assert_eq!(vc.rig().zoom, 2.0);
    vc.zoom(-500.0);
    assert_eq!(vc.rig().zoom, 2.0);
    assert_eq!((settings.zoom.min(), settings.zoom.max(), settings.zoom.sensitivity()), (2.0, 2.0, 0.01));
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_restores_default_pose_exactly() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(0.0, 0.0), Button::Primary);
    vc.continue_drag(Point::new(33.0, -71.0));
    vc.end_drag();
    vc.begin_drag(Point::new(0.0, 0.0), Button::Secondary);
    vc.continue_drag(Point::new(-12.0, 400.0));
    vc.end_drag();
    vc.zoom(-777.0);
    vc.reset();
    let cam = vc.rig();
    assert_eq!(cam.pitch, DEFAULT_PITCH);
    assert_eq!(cam.yaw, DEFAULT_YAW);
    assert_eq!(cam.zoom, DEFAULT_ZOOM);
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.viewport_width, 800.0);
    assert_eq!(cam.viewport_height, 600.0);
}

#[test]
fn orbit_reset_restores_target_and_distance() {
    let mut vc = orbit_controller();
    vc.frame_bounds(&crate::model::PlaceholderLoader::bounds(), 1.5);
    vc.begin_drag(Point::new(0.0, 0.0), Button::Secondary);
    vc.continue_drag(Point::new(60.0, 10.0));
    vc.end_drag();
    vc.reset();
    assert_eq!(*vc.rig(), OrbitCamera { viewport_width: 800.0, viewport_height: 600.0, ..OrbitCamera::default() });
}

#[test]
fn reset_leaves_drag_state_alone() {
    let mut vc = flat_controller();
    vc.begin_drag(Point::new(0.0, 0.0), Button::Primary);
    vc.reset();
    assert!(vc.drag_state().is_dragging());
}

// =============================================================
// Resize / framing
// =============================================================

#[test]
fn resize_clamps_to_one_pixel() {
    let mut vc = flat_controller();
    vc.resize(0.0, -5.0);
    assert_eq!(vc.rig().viewport_width, 1.0);
    assert_eq!(vc.rig().viewport_height, 1.0);
}

#[test]
fn resize_keeps_pose() {
    let mut vc = flat_controller();
    vc.zoom(-500.0);
    vc.resize(1024.0, 768.0);
    assert!(approx_eq(vc.rig().zoom, 1.5));
    assert_eq!(vc.transform().origin_on_screen(), Point::new(512.0, 384.0));
}

#[test]
fn flat_frame_bounds_centers_building() {
    let mut vc = flat_controller();
    let bounds = Aabb::new(DVec3::new(100.0, 0.0, -20.0), DVec3::new(300.0, 50.0, 20.0));
    vc.frame_bounds(&bounds, 1.5);
    let cam = vc.transform();
    // min(800, 600) / (200 * 1.5) = 2.0
    assert!(approx_eq(cam.zoom, 2.0));
    let center = cam.world_to_screen(crate::camera::flat_anchor(&bounds));
    assert!(approx_eq(center.x, 400.0) && approx_eq(center.y, 300.0));
}

#[test]
fn orbit_frame_bounds_targets_center() {
    let mut vc = orbit_controller();
    let bounds = crate::model::PlaceholderLoader::bounds();
    vc.frame_bounds(&bounds, 1.5);
    let cam = vc.rig();
    assert_eq!(cam.target, bounds.center());
    let expected = 75.0 / (22.5_f64.to_radians()).tan() * 1.5;
    assert!(approx_eq(cam.distance, expected));
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn transform_is_fresh_each_call() {
    let mut vc = flat_controller();
    let before = vc.transform();
    vc.zoom(-100.0);
    assert_ne!(vc.transform(), before);
}
