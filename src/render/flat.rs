//! Flat pseudo-3D painter.
//!
//! Objects are drawn as front elevations: each part becomes a screen
//! rectangle, x to the right and world y up. The building volume gets a
//! cheap oblique projection whose depth edges lean along the camera yaw.

#[cfg(test)]
#[path = "flat_test.rs"]
mod flat_test;

use crate::camera::{FlatCamera, Point, flat_anchor};
use crate::color::Rgb;
use crate::consts::{GRID_HALF_LINES, GRID_SPACING};
use crate::model::Aabb;
use crate::recipe::Part;

use super::{AXIS_STROKE, BACKGROUND, BUILDING_STROKE, DisplayList, DrawCmd, FrameInput, GRID_STROKE, ScenePainter};

const BUILDING_FRONT: Rgb = Rgb(0x99, 0x99, 0x99);
const BUILDING_TOP: Rgb = Rgb(0x88, 0x88, 0x88);
const BUILDING_SIDE: Rgb = Rgb(0x66, 0x66, 0x66);

impl ScenePainter for FlatCamera {
    fn paint(&self, frame: &FrameInput<'_>, out: &mut DisplayList) {
        out.push(DrawCmd::Clear { color: BACKGROUND });

        if frame.show_grid {
            draw_grid(self, out);
        }

        if let Some(model) = frame.model {
            draw_building(self, &model.bounds, out);
        }

        for visual in frame.placed_visuals() {
            let origin = self.world_to_screen(Point::new(visual.position.x, visual.position.y));
            for part in &visual.geometry.parts {
                draw_part(self, origin, part, out);
            }
        }
    }
}

// =============================================================
// Layers
// =============================================================

fn draw_grid(cam: &FlatCamera, out: &mut DisplayList) {
    let center = cam.origin_on_screen();
    let spacing = cam.world_dist_to_screen(GRID_SPACING);
    let (w, h) = (cam.viewport_width, cam.viewport_height);

    for i in -GRID_HALF_LINES..GRID_HALF_LINES {
        let offset = f64::from(i) * spacing;
        let x = center.x + offset;
        let y = center.y + offset;
        out.push(DrawCmd::Line { from: Point::new(x, 0.0), to: Point::new(x, h), stroke: GRID_STROKE });
        out.push(DrawCmd::Line { from: Point::new(0.0, y), to: Point::new(w, y), stroke: GRID_STROKE });
    }

    out.push(DrawCmd::Line { from: Point::new(center.x, 0.0), to: Point::new(center.x, h), stroke: AXIS_STROKE });
    out.push(DrawCmd::Line { from: Point::new(0.0, center.y), to: Point::new(w, center.y), stroke: AXIS_STROKE });
}

/// Top, side, then front face, so the front ends up on top.
fn draw_building(cam: &FlatCamera, bounds: &Aabb, out: &mut DisplayList) {
    let c = cam.world_to_screen(flat_anchor(bounds));
    let size = bounds.extents();
    let half_w = cam.world_dist_to_screen(size.x) * 0.5;
    let half_h = cam.world_dist_to_screen(size.y) * 0.5;
    let depth = cam.world_dist_to_screen(size.z);
    let (sin_y, cos_y) = cam.yaw.sin_cos();
    let (dx, dy) = (depth * cos_y, depth * sin_y);

    let top_left = Point::new(c.x - half_w, c.y - half_h);
    let top_right = Point::new(c.x + half_w, c.y - half_h);
    let bottom_right = Point::new(c.x + half_w, c.y + half_h);
    let bottom_left = Point::new(c.x - half_w, c.y + half_h);
    let shifted = |p: Point| Point::new(p.x + dx, p.y + dy);

    let faces = [
        (vec![top_left, top_right, shifted(top_right), shifted(top_left)], BUILDING_TOP),
        (vec![top_left, bottom_left, shifted(bottom_left), shifted(top_left)], BUILDING_SIDE),
        (vec![top_left, top_right, bottom_right, bottom_left], BUILDING_FRONT),
    ];
    for (points, fill) in faces {
        out.push(DrawCmd::Polygon { points, fill: Some(fill), stroke: Some(BUILDING_STROKE) });
    }
}

fn draw_part(cam: &FlatCamera, origin: Point, part: &Part, out: &mut DisplayList) {
    let left = origin.x + cam.world_dist_to_screen(part.min.x);
    let top = origin.y - cam.world_dist_to_screen(part.max.y);
    out.push(DrawCmd::Rect {
        origin: Point::new(left, top),
        width: cam.world_dist_to_screen(part.max.x - part.min.x),
        height: cam.world_dist_to_screen(part.max.y - part.min.y),
        fill: part.fill,
        stroke: part.stroke,
    });
}
