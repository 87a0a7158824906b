use std::time::Duration;

use crate::shared::constants::{
    DEFAULT_CLASSIFY_INTERVAL_MS, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_SAMPLE_INTERVAL_MS,
    DEFAULT_SAMPLES_PER_CLASS,
};

/// Tunables for one workflow session. Defaults match the shipped behavior;
/// the CLI overrides individual fields from flags.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// Labeled examples collected per class during training.
    pub samples_per_class: usize,
    /// Pause between consecutive training captures.
    pub sample_interval: Duration,
    /// Pause between consecutive classify-loop iterations.
    pub classify_interval: Duration,
    /// Minimum touching confidence for a positive detection.
    pub confidence_threshold: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            samples_per_class: DEFAULT_SAMPLES_PER_CLASS,
            sample_interval: Duration::from_millis(DEFAULT_SAMPLE_INTERVAL_MS),
            classify_interval: Duration::from_millis(DEFAULT_CLASSIFY_INTERVAL_MS),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}
