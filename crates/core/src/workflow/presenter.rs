use crate::classify::domain::gesture_label::GestureLabel;
use crate::classify::domain::prediction::Prediction;
use crate::workflow::workflow_state::Phase;

/// Cross-cutting observer for workflow events.
///
/// Decouples the workflow from any particular front end (CLI rendering,
/// GUI signals, logging) so each caller can watch a session without
/// changing the orchestration code.
pub trait Presenter: Send {
    /// The workflow entered a new phase.
    fn phase_changed(&mut self, phase: &Phase);

    /// One training sample was submitted; `done` counts from 1 to `total`.
    fn training_progress(&mut self, label: GestureLabel, done: usize, total: usize);

    /// One classify-loop iteration completed.
    fn prediction(&mut self, prediction: &Prediction, gesture_active: bool);

    /// A recoverable error occurred. `kind` names the failing stage
    /// ("capture", "embed", "classify").
    fn error(&mut self, kind: &str, message: &str);
}

/// Silent presenter that discards all events. Used by tests where the
/// observer side is irrelevant.
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn phase_changed(&mut self, _phase: &Phase) {}
    fn training_progress(&mut self, _label: GestureLabel, _done: usize, _total: usize) {}
    fn prediction(&mut self, _prediction: &Prediction, _gesture_active: bool) {}
    fn error(&mut self, _kind: &str, _message: &str) {}
}

/// Presenter that forwards events to the `log` facade. Progress output is
/// throttled to every `throttle` samples to keep training logs readable.
pub struct LogPresenter {
    throttle: usize,
}

impl LogPresenter {
    pub fn new(throttle: usize) -> Self {
        Self {
            throttle: throttle.max(1),
        }
    }
}

impl Default for LogPresenter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Presenter for LogPresenter {
    fn phase_changed(&mut self, phase: &Phase) {
        log::info!("Phase: {}", phase.name());
    }

    fn training_progress(&mut self, label: GestureLabel, done: usize, total: usize) {
        if done % self.throttle == 0 || done == total {
            log::info!("Training '{label}': {done}/{total}");
        }
    }

    fn prediction(&mut self, prediction: &Prediction, gesture_active: bool) {
        log::debug!(
            "Prediction: {} ({:.2}) gesture_active={gesture_active}",
            prediction.label(),
            prediction.confidence_of(prediction.label()),
        );
    }

    fn error(&mut self, kind: &str, message: &str) {
        log::warn!("{kind} error: {message}");
    }
}
