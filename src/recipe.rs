//! Equipment kinds and their procedural geometry.
//!
//! Every kind maps to a fixed recipe of axis-aligned boxes in object space
//! (x right, y up, z depth, origin at the ground contact point). The same
//! kind always yields the same geometry; nothing else feeds into it.

#[cfg(test)]
#[path = "recipe_test.rs"]
mod recipe_test;

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Stroke};
use crate::model::Aabb;
use crate::placement::PlacementError;

/// Outline gray used for scaffold frames.
const SCAFFOLD_GRAY: Rgb = Rgb(0x88, 0x88, 0x88);

/// Scaffold bay height in world units.
const SCAFFOLD_BAY: f64 = 15.0;

/// Number of stacked scaffold bays.
const SCAFFOLD_BAYS: u32 = 5;

const OUTLINE: Stroke = Stroke::new(Rgb::BLACK, 2.0);

/// Placeable construction-site equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    /// Tower crane: base, mast and jib.
    Crane,
    /// Stack of scaffold bays.
    Scaffold,
    /// Site container.
    Container,
}

impl EquipmentKind {
    pub const ALL: [Self; 3] = [Self::Crane, Self::Scaffold, Self::Container];

    /// Palette tag, as carried by drop payloads.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Crane => "crane",
            Self::Scaffold => "scaffold",
            Self::Container => "container",
        }
    }

    /// Name shown in the placed-equipment list.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Crane => "Tower crane",
            Self::Scaffold => "Scaffold",
            Self::Container => "Container",
        }
    }

    /// Build this kind's geometry.
    #[must_use]
    pub fn geometry(self) -> Geometry {
        let parts = match self {
            Self::Crane => crane_parts(),
            Self::Scaffold => scaffold_parts(),
            Self::Container => container_parts(),
        };
        Geometry { kind: self, parts }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EquipmentKind {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| PlacementError::UnknownKind(s.to_string()))
    }
}

/// One box of a recipe, in object space.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub min: DVec3,
    pub max: DVec3,
    /// `None` draws the box as an outline only.
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
}

impl Part {
    fn solid(name: &'static str, min: DVec3, max: DVec3, fill: Rgb) -> Self {
        Self { name, min, max, fill: Some(fill), stroke: Some(OUTLINE) }
    }

    fn frame(name: &'static str, min: DVec3, max: DVec3, stroke: Stroke) -> Self {
        Self { name, min, max, fill: None, stroke: Some(stroke) }
    }

    /// The eight corners once the part is placed at `origin`, bottom face first.
    #[must_use]
    pub fn corners(&self, origin: DVec3) -> [DVec3; 8] {
        Aabb::new(self.min, self.max).translated(origin).corners()
    }
}

/// The drawable shape of one equipment kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub kind: EquipmentKind,
    pub parts: Vec<Part>,
}

impl Geometry {
    /// Object-space bounds covering every part.
    #[must_use]
    pub fn bounds(&self) -> (DVec3, DVec3) {
        self.parts.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(p.min), hi.max(p.max)),
        )
    }
}

fn crane_parts() -> Vec<Part> {
    vec![
        Part::solid("base", DVec3::new(-15.0, 0.0, -15.0), DVec3::new(15.0, 10.0, 15.0), Rgb::YELLOW),
        Part::solid("mast", DVec3::new(-5.0, 10.0, -5.0), DVec3::new(5.0, 110.0, 5.0), Rgb::RED),
        Part::solid("jib", DVec3::new(-80.0, 110.0, -2.5), DVec3::new(80.0, 115.0, 2.5), Rgb::BLUE),
    ]
}

fn scaffold_parts() -> Vec<Part> {
    (0..SCAFFOLD_BAYS)
        .map(|i| {
            let floor = f64::from(i) * SCAFFOLD_BAY;
            Part::frame(
                "bay",
                DVec3::new(-30.0, floor, -5.0),
                DVec3::new(30.0, floor + SCAFFOLD_BAY, 5.0),
                Stroke::new(SCAFFOLD_GRAY, 3.0),
            )
        })
        .collect()
}

fn container_parts() -> Vec<Part> {
    vec![Part::solid("box", DVec3::new(-40.0, 0.0, -15.0), DVec3::new(40.0, 30.0, 15.0), Rgb::GREEN)]
}
