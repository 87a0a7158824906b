use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::classify::domain::classifier::GestureClassifier;
use crate::classify::domain::gesture_label::GestureLabel;
use crate::classify::domain::prediction::Prediction;
use crate::embedding::domain::embedder::Embedder;
use crate::shared::config::WorkflowConfig;
use crate::workflow::presenter::Presenter;
use crate::workflow::sample_trainer::{SampleTrainer, TrainingError};
use crate::workflow::workflow_state::{Detection, Phase, WorkflowState};

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("training cannot start from the {current} phase")]
    InvalidPhase { current: &'static str },
    #[error(transparent)]
    Training(#[from] TrainingError),
}

/// The session state machine.
///
/// Phases advance in one fixed order per session:
/// initializing → ready → training (not touching) → training (touching)
/// → running. The running phase loops until the cancellation token is set;
/// it is never exited by the workflow itself.
///
/// A failed training phase stays current and may be retried; a completed
/// phase is never re-entered.
pub struct GestureWorkflow {
    source: Box<dyn FrameSource>,
    embedder: Box<dyn Embedder>,
    classifier: Box<dyn GestureClassifier>,
    presenter: Box<dyn Presenter>,
    trainer: SampleTrainer,
    config: WorkflowConfig,
    state: WorkflowState,
    cancelled: Arc<AtomicBool>,
}

impl std::fmt::Debug for GestureWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureWorkflow")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl GestureWorkflow {
    pub fn new(
        source: Box<dyn FrameSource>,
        embedder: Box<dyn Embedder>,
        classifier: Box<dyn GestureClassifier>,
        presenter: Box<dyn Presenter>,
        config: WorkflowConfig,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        let trainer = SampleTrainer::new(config.sample_interval);
        Self {
            source,
            embedder,
            classifier,
            presenter,
            trainer,
            config,
            state: WorkflowState::new(),
            cancelled,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn cancellation_token(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Initializing → ready, once all collaborators are in place. No-op
    /// from any later phase.
    pub(crate) fn mark_ready(&mut self) {
        if *self.state.phase() == Phase::Initializing {
            self.transition(Phase::Ready);
        }
    }

    /// Drives the session from the user's training request to the
    /// continuous classify loop.
    ///
    /// Valid from `Ready` (starts with the not-touching class) or from a
    /// failed `Training` phase (retries that class). Returns once the
    /// session is torn down via the cancellation token, or with the
    /// training error that interrupted a phase.
    pub fn train_and_run(&mut self) -> Result<(), WorkflowError> {
        let start_label = match self.state.phase() {
            Phase::Ready => GestureLabel::NotTouching,
            Phase::Training { label, .. } => *label,
            phase => {
                return Err(WorkflowError::InvalidPhase {
                    current: phase.name(),
                })
            }
        };

        if start_label == GestureLabel::NotTouching {
            self.run_training_phase(GestureLabel::NotTouching)?;
        }
        self.run_training_phase(GestureLabel::Touching)?;

        self.classify_loop();
        Ok(())
    }

    fn run_training_phase(&mut self, label: GestureLabel) -> Result<(), WorkflowError> {
        let total = self.config.samples_per_class;
        self.transition(Phase::Training {
            label,
            done: 0,
            total,
        });

        let Self {
            source,
            embedder,
            classifier,
            presenter,
            trainer,
            state,
            cancelled,
            ..
        } = self;

        let result = trainer.collect(
            label,
            total,
            source.as_mut(),
            embedder.as_mut(),
            classifier.as_mut(),
            &mut |done, total| {
                state.set_phase(Phase::Training { label, done, total });
                presenter.training_progress(label, done, total);
            },
            cancelled,
        );

        if let Err(e) = result {
            if !matches!(e, TrainingError::Cancelled { .. }) {
                self.presenter.error("training", &e.to_string());
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// The indefinite classify loop. Failures inside an iteration are
    /// reported as transient and the loop retries on its next tick.
    fn classify_loop(&mut self) {
        self.transition(Phase::Running);

        while !self.cancelled.load(Ordering::Relaxed) {
            self.classify_once();

            if !self.config.classify_interval.is_zero() {
                std::thread::sleep(self.config.classify_interval);
            }
        }
        log::info!("Classify loop cancelled; session torn down");
    }

    fn classify_once(&mut self) {
        let frame = match self.source.capture() {
            Ok(frame) => frame,
            Err(e) => {
                self.presenter.error("capture", &e.to_string());
                return;
            }
        };

        let vector = match self.embedder.embed(&frame) {
            Ok(vector) => vector,
            Err(e) => {
                self.presenter.error("embed", &e.to_string());
                return;
            }
        };

        let prediction = match self.classifier.predict(&vector) {
            Ok(prediction) => prediction,
            Err(e) => {
                self.presenter.error("classify", &e.to_string());
                return;
            }
        };

        let gesture_active = gesture_detected(&prediction, self.config.confidence_threshold);
        self.state.record_detection(Detection {
            prediction: prediction.clone(),
            gesture_active,
        });
        self.presenter.prediction(&prediction, gesture_active);
    }

    fn transition(&mut self, phase: Phase) {
        log::debug!(
            "Workflow phase: {} -> {}",
            self.state.phase().name(),
            phase.name()
        );
        self.state.set_phase(phase);
        self.presenter.phase_changed(self.state.phase());
    }
}

/// A positive detection requires the touching label to win with confidence
/// strictly above the threshold. A not-touching win is never a detection,
/// whatever its confidence.
pub fn gesture_detected(prediction: &Prediction, threshold: f64) -> bool {
    prediction.label() == GestureLabel::Touching
        && prediction.confidence_of(GestureLabel::Touching) > threshold
}
