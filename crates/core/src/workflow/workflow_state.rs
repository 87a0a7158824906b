use crate::classify::domain::gesture_label::GestureLabel;
use crate::classify::domain::prediction::Prediction;

/// Where the session currently stands. One tagged value replaces the
/// original pile of independent UI flags, so contradictory combinations
/// cannot be represented.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// Collaborators are being acquired (camera, model, classifier).
    Initializing,
    /// Everything acquired; waiting for the user to start training.
    Ready,
    /// Collecting `total` examples for `label`; `done` submitted so far.
    Training {
        label: GestureLabel,
        done: usize,
        total: usize,
    },
    /// Continuous classify loop; never exited within a session.
    Running,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Initializing => "initializing",
            Phase::Ready => "ready",
            Phase::Training { .. } => "training",
            Phase::Running => "running",
        }
    }
}

/// Latest classify-loop result: the raw prediction plus the thresholded
/// gesture decision derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub prediction: Prediction,
    pub gesture_active: bool,
}

/// Single session-wide state record. Mutated only by the workflow;
/// observers see it through presenter events.
#[derive(Clone, Debug)]
pub struct WorkflowState {
    phase: Phase,
    last_detection: Option<Detection>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Initializing,
            last_detection: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_detection(&self) -> Option<&Detection> {
        self.last_detection.as_ref()
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn record_detection(&mut self, detection: Detection) {
        self.last_detection = Some(detection);
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}
