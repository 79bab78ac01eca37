//! Perspective painter for the orbit camera.
//!
//! Boxes are split into quads, culled against the eye, flat-shaded with a
//! fixed sun direction and drawn far-to-near (painter's algorithm). A box
//! with any corner behind the near plane is skipped whole; grid lines are
//! cut at the near plane instead.

#[cfg(test)]
#[path = "orbit_test.rs"]
mod orbit_test;

use glam::DVec3;

use crate::camera::Point;
use crate::color::{Rgb, Stroke};
use crate::consts::{GRID_HALF_LINES, GRID_SPACING};
use crate::orbit::OrbitTransform;

use super::{AXIS_STROKE, BACKGROUND, BUILDING_STROKE, DisplayList, DrawCmd, FrameInput, GRID_STROKE, ScenePainter};

const BUILDING_FILL: Rgb = Rgb(0x88, 0x88, 0x88);

/// Share of a face's color it keeps when facing away from the sun.
const AMBIENT: f64 = 0.35;

/// Quads of a box as corner indices (see [`crate::model::Aabb::corners`])
/// with their outward normals.
const BOX_FACES: [([usize; 4], DVec3); 6] = [
    ([0, 1, 2, 3], DVec3::NEG_Y),
    ([4, 5, 6, 7], DVec3::Y),
    ([0, 1, 5, 4], DVec3::NEG_Z),
    ([3, 2, 6, 7], DVec3::Z),
    ([0, 3, 7, 4], DVec3::NEG_X),
    ([1, 2, 6, 5], DVec3::X),
];

/// A quad ready to draw.
struct Face {
    points: Vec<Point>,
    depth: f64,
    fill: Option<Rgb>,
    stroke: Option<Stroke>,
}

impl ScenePainter for OrbitTransform {
    fn paint(&self, frame: &FrameInput<'_>, out: &mut DisplayList) {
        out.push(DrawCmd::Clear { color: BACKGROUND });

        if frame.show_grid {
            draw_grid(self, out);
        }

        let mut faces = Vec::new();
        if let Some(model) = frame.model {
            push_box(self, &model.bounds.corners(), Some(BUILDING_FILL), Some(BUILDING_STROKE), &mut faces);
        }
        for visual in frame.placed_visuals() {
            for part in &visual.geometry.parts {
                push_box(self, &part.corners(visual.position), part.fill, part.stroke, &mut faces);
            }
        }

        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for face in faces {
            out.push(DrawCmd::Polygon { points: face.points, fill: face.fill, stroke: face.stroke });
        }
    }
}

fn draw_grid(t: &OrbitTransform, out: &mut DisplayList) {
    let extent = f64::from(GRID_HALF_LINES) * GRID_SPACING;
    for i in -GRID_HALF_LINES..=GRID_HALF_LINES {
        let offset = f64::from(i) * GRID_SPACING;
        let stroke = if i == 0 { AXIS_STROKE } else { GRID_STROKE };
        let along_z = (DVec3::new(offset, 0.0, -extent), DVec3::new(offset, 0.0, extent));
        let along_x = (DVec3::new(-extent, 0.0, offset), DVec3::new(extent, 0.0, offset));
        for (a, b) in [along_z, along_x] {
            if let Some((from, to)) = t.project_segment(a, b) {
                out.push(DrawCmd::Line { from: from.screen, to: to.screen, stroke });
            }
        }
    }
}

/// Sun direction for flat shading.
fn light_dir() -> DVec3 {
    DVec3::new(0.4, 1.0, 0.3).normalize()
}

/// Queue the visible quads of one box. Filled boxes are culled and shaded;
/// outline-only boxes keep every face so they read as wireframes.
fn push_box(t: &OrbitTransform, corners: &[DVec3; 8], fill: Option<Rgb>, stroke: Option<Stroke>, faces: &mut Vec<Face>) {
    let mut projected = Vec::with_capacity(corners.len());
    for corner in corners {
        let Some(p) = t.project(*corner) else {
            return;
        };
        projected.push(p);
    }

    for (indices, normal) in BOX_FACES {
        let center = indices.iter().map(|&i| corners[i]).sum::<DVec3>() * 0.25;
        if fill.is_some() && normal.dot(t.eye - center) <= 0.0 {
            continue;
        }
        let shade = AMBIENT + (1.0 - AMBIENT) * normal.dot(light_dir()).max(0.0);
        faces.push(Face {
            points: indices.iter().map(|&i| projected[i].screen).collect(),
            depth: indices.iter().map(|&i| projected[i].depth).sum::<f64>() * 0.25,
            fill: fill.map(|c| c.shade(shade)),
            stroke,
        });
    }
}
