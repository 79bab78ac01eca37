//! Engine core: one viewport, one registry, one pipeline, one list.
//!
//! The host feeds [`HostEvent`]s in and gets [`Action`]s back; painting is
//! pulled by the render loop through [`EngineCore::paint`]. Nothing here is
//! global, so several viewers can run side by side.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};

use crate::camera::{FlatCamera, Point};
use crate::config::ViewerConfig;
use crate::error::ErrorCode;
use crate::input::Button;
use crate::model::{BuildingModel, ModelLoadError, ModelLoader, UploadStatus};
use crate::orbit::OrbitCamera;
use crate::placement::{DropPayload, PlacementError, PlacementPipeline};
use crate::render::{DisplayList, FrameInput, ScenePainter};
use crate::scene::{ObjectId, SceneRegistry};
use crate::sync_list::{ListRow, PlacedList};
use crate::viewport::{CameraRig, ViewportController};

/// Input from the host, in viewport CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    PointerDown { x: f64, y: f64, button: Button },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Wheel delta in pixels; positive scrolls down.
    Wheel { delta_y: f64 },
    /// A palette item dropped on the viewport.
    Drop { x: f64, y: f64, payload: DropPayload },
    Resize { width: f64, height: f64 },
    /// The remove control of a list row.
    Remove { id: ObjectId },
    ToggleGrid,
    ResetView,
}

/// Outcomes the host may want to reflect in its UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectPlaced(ObjectId),
    ObjectRemoved(ObjectId),
    PlacementRejected(PlacementError),
    UploadStatusChanged(UploadStatus),
}

/// All state of one viewer, generic over the camera variant.
pub struct EngineCore<R> {
    viewport: ViewportController<R>,
    scene: SceneRegistry,
    pipeline: PlacementPipeline,
    list: PlacedList,
    model: Option<BuildingModel>,
    upload: UploadStatus,
    show_grid: bool,
    frame_margin: f64,
}

impl EngineCore<FlatCamera> {
    /// Viewer with the flat pseudo-3D camera.
    #[must_use]
    pub fn flat(config: &ViewerConfig) -> Self {
        Self::new(FlatCamera::new(), config)
    }
}

impl EngineCore<OrbitCamera> {
    /// Viewer with the perspective orbit camera.
    #[must_use]
    pub fn orbit(config: &ViewerConfig) -> Self {
        Self::new(OrbitCamera::new(config.orbit), config)
    }
}

impl<R: CameraRig> EngineCore<R> {
    #[must_use]
    pub fn new(rig: R, config: &ViewerConfig) -> Self {
        let mut scene = SceneRegistry::new();
        let list = PlacedList::attach(&mut scene);
        Self {
            viewport: ViewportController::new(rig, config.controls),
            scene,
            pipeline: PlacementPipeline::new(),
            list,
            model: None,
            upload: UploadStatus::Empty,
            show_grid: true,
            frame_margin: config.frame_margin,
        }
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: HostEvent) -> Vec<Action> {
        match event {
            HostEvent::PointerDown { x, y, button } => self.viewport.begin_drag(Point::new(x, y), button),
            HostEvent::PointerMove { x, y } => self.viewport.continue_drag(Point::new(x, y)),
            HostEvent::PointerUp => self.viewport.end_drag(),
            HostEvent::Wheel { delta_y } => self.viewport.zoom(delta_y),
            HostEvent::Resize { width, height } => self.viewport.resize(width, height),
            HostEvent::ToggleGrid => self.toggle_grid(),
            HostEvent::ResetView => self.reset_view(),
            HostEvent::Drop { x, y, payload } => return vec![self.drop_at(Point::new(x, y), &payload)],
            HostEvent::Remove { id } => return self.remove(id).into_iter().collect(),
        }
        Vec::new()
    }

    /// Place a palette drop at a screen point.
    pub fn drop_at(&mut self, at: Point, payload: &DropPayload) -> Action {
        let transform = self.viewport.transform();
        match self.pipeline.place(&transform, at, payload, &mut self.scene) {
            Ok(obj) => Action::ObjectPlaced(obj.id()),
            Err(err) => {
                tracing::warn!(
                    code = err.error_code(),
                    error = %err,
                    x = at.x,
                    y = at.y,
                    "drop rejected"
                );
                Action::PlacementRejected(err)
            }
        }
    }

    /// Remove a placed object through the list. `None` if it was already gone.
    pub fn remove(&mut self, id: ObjectId) -> Option<Action> {
        if !self.list.remove(id, &mut self.scene) {
            tracing::debug!(%id, "remove of unknown object ignored");
            return None;
        }
        tracing::info!(%id, remaining = self.scene.len(), "equipment removed");
        Some(Action::ObjectRemoved(id))
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        tracing::debug!(show_grid = self.show_grid, "grid toggled");
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Run a loader and apply its outcome.
    pub fn load_model(&mut self, loader: &impl ModelLoader, file_name: &str, bytes: &[u8]) -> Action {
        self.finish_model_load(loader.load(file_name, bytes))
    }

    /// Apply the outcome of an asynchronous model load. Success auto-frames
    /// the camera; failure discards any previous model.
    pub fn finish_model_load(&mut self, result: Result<BuildingModel, ModelLoadError>) -> Action {
        match result {
            Ok(model) => {
                tracing::info!(file = %model.file_name, extent = model.bounds.max_extent(), "model loaded");
                self.viewport.frame_bounds(&model.bounds, self.frame_margin);
                self.upload = UploadStatus::Loaded { file_name: model.file_name.clone() };
                self.model = Some(model);
            }
            Err(err) => {
                tracing::warn!(code = err.error_code(), error = %err, "model load failed");
                self.model = None;
                self.upload = UploadStatus::Failed { reason: err.to_string() };
            }
        }
        Action::UploadStatusChanged(self.upload.clone())
    }

    /// Paint the current frame into `out`, replacing its contents.
    pub fn paint(&self, out: &mut DisplayList) {
        let (width, height) = self.viewport.viewport_size();
        out.reset(width, height);
        let frame = FrameInput {
            objects: self.scene.all(),
            visuals: self.scene.visuals(),
            model: self.model.as_ref(),
            show_grid: self.show_grid,
        };
        self.viewport.transform().paint(&frame, out);
    }

    /// Dispose every visual and detach every listener.
    pub fn teardown(mut self) {
        tracing::info!(objects = self.scene.len(), "viewer torn down");
        self.scene.clear();
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> &ViewportController<R> {
        &self.viewport
    }

    #[must_use]
    pub fn scene(&self) -> &SceneRegistry {
        &self.scene
    }

    /// Rows of the placed-equipment list.
    #[must_use]
    pub fn rows(&self) -> Vec<ListRow> {
        self.list.rows()
    }

    #[must_use]
    pub fn model(&self) -> Option<&BuildingModel> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn upload_status(&self) -> &UploadStatus {
        &self.upload
    }

    #[must_use]
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }
}
