//! Rendering: turns the scene into a backend-neutral display list.
//!
//! Painters receive read-only views of the registry, the visual store and
//! the loaded model, plus a camera transform snapshot. They only append
//! [`DrawCmd`]s; presenting them is up to a [`crate::frame_loop::Surface`].
//!
//! Layers, bottom first: background, ground grid (optional), building
//! volume (if a model is loaded), placed equipment in registry order.


pub mod flat;
pub mod orbit;

use crate::camera::Point;
use crate::color::{Rgb, Stroke};
use crate::model::BuildingModel;
use crate::scene::PlacedObject;
use crate::visual::{Visual, VisualStore};

/// Canvas background.
pub const BACKGROUND: Rgb = Rgb(0x0a, 0x0a, 0x0a);

/// Regular grid line style.
pub const GRID_STROKE: Stroke = Stroke::new(Rgb(0x22, 0x22, 0x22), 1.0);

/// Grid lines through the origin.
pub const AXIS_STROKE: Stroke = Stroke::new(Rgb(0x44, 0x44, 0x44), 2.0);

/// Outline for the building volume.
pub const BUILDING_STROKE: Stroke = Stroke::new(Rgb::BLACK, 2.0);

/// One drawing instruction, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface.
    Clear { color: Rgb },
    Line { from: Point, to: Point, stroke: Stroke },
    /// Axis-aligned screen rectangle; `origin` is the top-left corner.
    Rect { origin: Point, width: f64, height: f64, fill: Option<Rgb>, stroke: Option<Stroke> },
    /// Closed polygon.
    Polygon { points: Vec<Point>, fill: Option<Rgb>, stroke: Option<Stroke> },
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    commands: Vec<DrawCmd>,
}

impl DisplayList {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    /// Start a new frame, keeping the allocation.
    pub fn reset(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Read-only view of everything a painter draws.
#[derive(Clone, Copy)]
pub struct FrameInput<'a> {
    pub objects: &'a [PlacedObject],
    pub visuals: &'a VisualStore,
    pub model: Option<&'a BuildingModel>,
    pub show_grid: bool,
}

impl<'a> FrameInput<'a> {
    /// Visuals of the placed objects, in registry order.
    pub fn placed_visuals(&self) -> impl Iterator<Item = &'a Visual> + 'a {
        let visuals = self.visuals;
        self.objects.iter().filter_map(move |obj| visuals.get(obj.visual()))
    }
}

/// A camera transform that knows how to draw a frame.
pub trait ScenePainter {
    /// Append the frame's draw commands to `out`. `out` is not reset first.
    fn paint(&self, frame: &FrameInput<'_>, out: &mut DisplayList);
}
