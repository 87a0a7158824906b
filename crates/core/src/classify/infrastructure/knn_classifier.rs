use thiserror::Error;

use crate::classify::domain::classifier::GestureClassifier;
use crate::classify::domain::gesture_label::GestureLabel;
use crate::classify::domain::prediction::Prediction;
use crate::shared::constants::KNN_NEIGHBORS;
use crate::shared::feature_vector::FeatureVector;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("no training examples have been added yet")]
    NoExamplesYet,
}

/// In-memory k-nearest-neighbor classifier over embedding vectors.
///
/// Prediction takes the k stored examples closest to the query (squared
/// Euclidean distance) and reports each label's vote share as its
/// confidence. Ties between labels go to the one owning the nearest
/// example. Examples live for the session only; nothing is persisted.
pub struct KnnClassifier {
    examples: Vec<(FeatureVector, GestureLabel)>,
    k: usize,
}

impl KnnClassifier {
    pub fn new(k: usize) -> Self {
        Self {
            examples: Vec::new(),
            k: k.max(1),
        }
    }
}

impl Default for KnnClassifier {
    fn default() -> Self {
        Self::new(KNN_NEIGHBORS)
    }
}

impl GestureClassifier for KnnClassifier {
    fn add_example(&mut self, vector: FeatureVector, label: GestureLabel) {
        self.examples.push((vector, label));
    }

    fn predict(&mut self, vector: &FeatureVector) -> Result<Prediction, Box<dyn std::error::Error>> {
        if self.examples.is_empty() {
            return Err(Box::new(PredictError::NoExamplesYet));
        }

        let mut neighbors: Vec<(f32, GestureLabel)> = self
            .examples
            .iter()
            .map(|(example, label)| (example.squared_distance(vector), *label))
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        let k = self.k.min(neighbors.len());
        let nearest = &neighbors[..k];

        let touching_votes = nearest
            .iter()
            .filter(|(_, label)| *label == GestureLabel::Touching)
            .count();
        let touching = touching_votes as f64 / k as f64;
        let not_touching = 1.0 - touching;

        let label = if touching_votes * 2 == k {
            // Even split: side with the single nearest example
            nearest[0].1
        } else if touching > not_touching {
            GestureLabel::Touching
        } else {
            GestureLabel::NotTouching
        };

        Ok(Prediction::new(label, not_touching, touching))
    }

    fn example_count(&self, label: GestureLabel) -> usize {
        self.examples
            .iter()
            .filter(|(_, example_label)| *example_label == label)
            .count()
    }
}
