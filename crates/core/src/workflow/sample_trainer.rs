use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::classify::domain::classifier::GestureClassifier;
use crate::classify::domain::gesture_label::GestureLabel;
use crate::embedding::domain::embedder::Embedder;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("frame capture failed after {submitted} samples: {source}")]
    Capture {
        submitted: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("embedding failed after {submitted} samples: {source}")]
    Embedding {
        submitted: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("training cancelled after {submitted} samples")]
    Cancelled { submitted: usize },
}

impl TrainingError {
    /// Examples already submitted to the classifier before the failure.
    /// They stay there; there is no rollback.
    pub fn submitted(&self) -> usize {
        match self {
            TrainingError::Capture { submitted, .. }
            | TrainingError::Embedding { submitted, .. }
            | TrainingError::Cancelled { submitted } => *submitted,
        }
    }
}

/// Collects a fixed number of labeled samples for one class, pacing
/// captures in time.
///
/// Each iteration captures a frame, embeds it, submits the example, and
/// reports progress. A failure aborts the remainder of the phase but
/// leaves already-submitted examples in the classifier.
pub struct SampleTrainer {
    interval: Duration,
}

impl SampleTrainer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn collect(
        &self,
        label: GestureLabel,
        count: usize,
        source: &mut dyn FrameSource,
        embedder: &mut dyn Embedder,
        classifier: &mut dyn GestureClassifier,
        on_progress: &mut dyn FnMut(usize, usize),
        cancelled: &Arc<AtomicBool>,
    ) -> Result<(), TrainingError> {
        for i in 0..count {
            if cancelled.load(Ordering::Relaxed) {
                return Err(TrainingError::Cancelled { submitted: i });
            }

            let frame = source.capture().map_err(|e| TrainingError::Capture {
                submitted: i,
                source: e.to_string().into(),
            })?;

            let vector = embedder
                .embed(&frame)
                .map_err(|e| TrainingError::Embedding {
                    submitted: i,
                    source: e.to_string().into(),
                })?;

            classifier.add_example(vector, label);
            on_progress(i + 1, count);

            if i + 1 < count && !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
        }

        Ok(())
    }
}
