use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::infrastructure::camera_frame_source::CameraFrameSource;
use crate::classify::infrastructure::knn_classifier::KnnClassifier;
use crate::embedding::domain::embedder::Embedder;
use crate::embedding::infrastructure::model_resolver;
use crate::embedding::infrastructure::onnx_embedder::OnnxEmbedder;
use crate::shared::config::WorkflowConfig;
use crate::shared::constants::{EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL};
use crate::workflow::gesture_workflow::GestureWorkflow;
use crate::workflow::presenter::Presenter;

/// Fatal initialization failures. Neither is retried: the session cannot
/// proceed without a camera and a loaded embedding model.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("embedding model failed to load: {0}")]
    ModelLoadFailure(String),
}

/// Acquires the camera, materializes and loads the embedding model, builds
/// a fresh classifier, and hands back a workflow in the ready phase.
pub struct SessionInitializer {
    config: WorkflowConfig,
}

impl SessionInitializer {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Full initialization against a live camera device.
    pub fn initialize(
        &self,
        camera_device: &Path,
        model_override: Option<&Path>,
        presenter: Box<dyn Presenter>,
        cancelled: Arc<AtomicBool>,
    ) -> Result<GestureWorkflow, SessionError> {
        let source = CameraFrameSource::open(camera_device)
            .map_err(|e| SessionError::CameraUnavailable(e.to_string()))?;
        log::info!(
            "Camera open: {} ({}x{})",
            camera_device.display(),
            source.width(),
            source.height()
        );

        self.initialize_with_source(Box::new(source), model_override, presenter, cancelled)
    }

    /// Initialization with a caller-supplied frame source (e.g. an image
    /// directory when no camera is present).
    pub fn initialize_with_source(
        &self,
        source: Box<dyn FrameSource>,
        model_override: Option<&Path>,
        presenter: Box<dyn Presenter>,
        cancelled: Arc<AtomicBool>,
    ) -> Result<GestureWorkflow, SessionError> {
        let model_path =
            model_resolver::resolve(EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL, model_override)
                .map_err(|e| SessionError::ModelLoadFailure(e.to_string()))?;
        let embedder: Box<dyn Embedder> = Box::new(
            OnnxEmbedder::new(&model_path)
                .map_err(|e| SessionError::ModelLoadFailure(e.to_string()))?,
        );
        log::info!("Embedding model loaded from {}", model_path.display());

        let classifier = Box::new(KnnClassifier::default());

        let mut workflow = GestureWorkflow::new(
            source,
            embedder,
            classifier,
            presenter,
            self.config.clone(),
            cancelled,
        );
        workflow.mark_ready();
        Ok(workflow)
    }
}
