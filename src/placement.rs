//! Placement pipeline: palette drop → world position → geometry → registry.
//!
//! Where a drop lands depends on the camera variant. The flat camera's
//! inverse projection is affine and always succeeds; the orbit camera casts
//! a ray and can miss the ground. Both are reached through
//! [`GroundProjector`], so the pipeline itself does not care which is in use.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::error::ErrorCode;
use crate::recipe::EquipmentKind;
use crate::scene::{PlacedObject, SceneRegistry};

/// Why a drop produced no object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The pick ray is parallel to the ground or meets it behind the camera.
    #[error("drop point does not hit the ground")]
    NoGroundIntersection,
    /// The payload named equipment with no recipe.
    #[error("unknown equipment kind: {0:?}")]
    UnknownKind(String),
}

impl ErrorCode for PlacementError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoGroundIntersection => "E_NO_GROUND_INTERSECTION",
            Self::UnknownKind(_) => "E_UNKNOWN_KIND",
        }
    }
}

/// Maps screen points onto the ground and back.
pub trait GroundProjector {
    /// World position under a screen point.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::NoGroundIntersection`] when the screen point
    /// does not cover any ground.
    fn screen_to_ground(&self, screen: Point) -> Result<DVec3, PlacementError>;

    /// Screen position of a ground point, if it is in front of the camera.
    fn ground_to_screen(&self, world: DVec3) -> Option<Point>;
}

/// What the equipment palette attaches to a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPayload {
    /// Palette tag, e.g. `"crane"`.
    pub kind: String,
    pub duration_months: u32,
}

impl DropPayload {
    #[must_use]
    pub fn new(kind: impl Into<String>, duration_months: u32) -> Self {
        Self { kind: kind.into(), duration_months }
    }
}

/// Turns drops into placed objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementPipeline;

impl PlacementPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Place the payload's equipment under `at`.
    ///
    /// On success the object is appended to `registry` (one change
    /// notification) and a reference to the stored entry is returned. On
    /// failure nothing is created.
    ///
    /// # Errors
    ///
    /// [`PlacementError::UnknownKind`] for payloads without a recipe,
    /// [`PlacementError::NoGroundIntersection`] when the orbit ray misses.
    pub fn place<'r, P: GroundProjector>(
        &self,
        projector: &P,
        at: Point,
        payload: &DropPayload,
        registry: &'r mut SceneRegistry,
    ) -> Result<&'r PlacedObject, PlacementError> {
        let kind: EquipmentKind = payload.kind.parse()?;
        let position = projector.screen_to_ground(at)?;
        let visual = registry.visuals_mut().attach(kind.geometry(), position);
        let obj = PlacedObject::new(Uuid::now_v7(), kind, payload.duration_months, position, visual);
        tracing::info!(
            id = %obj.id(),
            kind = %kind,
            duration_months = payload.duration_months,
            x = position.x,
            y = position.y,
            z = position.z,
            "equipment placed"
        );
        Ok(registry.insert(obj))
    }
}
