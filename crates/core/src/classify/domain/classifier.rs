use crate::classify::domain::gesture_label::GestureLabel;
use crate::classify::domain::prediction::Prediction;
use crate::shared::feature_vector::FeatureVector;

/// Domain interface for the example-based gesture classifier.
///
/// Submitted examples are owned by the classifier; callers keep no copy.
/// `predict` fails if no example has been added yet.
pub trait GestureClassifier: Send {
    fn add_example(&mut self, vector: FeatureVector, label: GestureLabel);

    fn predict(&mut self, vector: &FeatureVector) -> Result<Prediction, Box<dyn std::error::Error>>;

    fn example_count(&self, label: GestureLabel) -> usize;
}
