//! Building model: the bounding volume the camera frames, the loader seam,
//! and the upload status shown to the user.
//!
//! Parsing the model file format is someone else's job. The core only needs
//! a bounding box once, right after a load succeeds.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::path::Path;

use glam::DVec3;

use crate::error::ErrorCode;

/// Axis-aligned bounding box in world units (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along x, y and z.
    #[must_use]
    pub fn extents(&self) -> DVec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.extents().max_element()
    }

    /// Whether all corners are finite and every edge has positive length.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.extents().min_element() > 0.0
    }

    /// The eight corners, bottom face first.
    #[must_use]
    pub fn corners(&self) -> [DVec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(b.x, b.y, b.z),
            DVec3::new(a.x, b.y, b.z),
        ]
    }

    /// The box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: DVec3) -> Self {
        Self { min: self.min + offset, max: self.max + offset }
    }
}

/// A loaded building model, as far as the viewport cares.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingModel {
    pub file_name: String,
    pub bounds: Aabb,
}

impl BuildingModel {
    /// Build a model from loader output, rejecting degenerate bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError::InvalidBounds`] when the box is empty or not finite.
    pub fn new(file_name: impl Into<String>, bounds: Aabb) -> Result<Self, ModelLoadError> {
        if !bounds.is_valid() {
            return Err(ModelLoadError::InvalidBounds);
        }
        Ok(Self { file_name: file_name.into(), bounds })
    }
}

/// Reasons a model load can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelLoadError {
    #[error("{file_name} is empty")]
    EmptyPayload { file_name: String },
    #[error("{file_name} is not an IFC file")]
    UnsupportedFormat { file_name: String },
    #[error("model has no usable bounding box")]
    InvalidBounds,
}

impl ErrorCode for ModelLoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPayload { .. } => "E_MODEL_EMPTY",
            Self::UnsupportedFormat { .. } => "E_MODEL_FORMAT",
            Self::InvalidBounds => "E_MODEL_BOUNDS",
        }
    }
}

/// Turns a raw file payload into a [`BuildingModel`].
pub trait ModelLoader {
    /// # Errors
    ///
    /// Returns a [`ModelLoadError`] describing why the payload is unusable.
    fn load(&self, file_name: &str, bytes: &[u8]) -> Result<BuildingModel, ModelLoadError>;
}

/// Stand-in loader: accepts any non-empty `.ifc` payload and reports a fixed
/// 150 × 100 × 80 building volume standing on the ground at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderLoader;

impl PlaceholderLoader {
    #[must_use]
    pub fn bounds() -> Aabb {
        Aabb::new(DVec3::new(-75.0, 0.0, -40.0), DVec3::new(75.0, 100.0, 40.0))
    }
}

impl ModelLoader for PlaceholderLoader {
    fn load(&self, file_name: &str, bytes: &[u8]) -> Result<BuildingModel, ModelLoadError> {
        let is_ifc = Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ifc"));
        if !is_ifc {
            return Err(ModelLoadError::UnsupportedFormat { file_name: file_name.to_string() });
        }
        if bytes.is_empty() {
            return Err(ModelLoadError::EmptyPayload { file_name: file_name.to_string() });
        }
        BuildingModel::new(file_name, Self::bounds())
    }
}

/// What the upload area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    /// Nothing loaded yet.
    #[default]
    Empty,
    Loaded { file_name: String },
    Failed { reason: String },
}

impl UploadStatus {
    /// User-visible message for the upload area.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Drop an IFC file here or click to upload".to_string(),
            Self::Loaded { file_name } => format!("\u{2713} {file_name} loaded"),
            Self::Failed { reason } => format!("Could not load model: {reason}"),
        }
    }
}
