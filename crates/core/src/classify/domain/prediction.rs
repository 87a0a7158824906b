use crate::classify::domain::gesture_label::GestureLabel;

/// Classifier output for one frame: the winning label plus a confidence
/// per label. Confidences lie in [0, 1] and sum to 1 across both labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    label: GestureLabel,
    confidences: [f64; 2],
}

impl Prediction {
    pub fn new(label: GestureLabel, not_touching: f64, touching: f64) -> Self {
        debug_assert!(
            ((not_touching + touching) - 1.0).abs() < 1e-6,
            "confidences must sum to 1"
        );
        Self {
            label,
            confidences: [not_touching, touching],
        }
    }

    pub fn label(&self) -> GestureLabel {
        self.label
    }

    pub fn confidence_of(&self, label: GestureLabel) -> f64 {
        self.confidences[label.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_confidence_lookup() {
        let p = Prediction::new(GestureLabel::Touching, 0.19, 0.81);
        assert_eq!(p.label(), GestureLabel::Touching);
        assert_relative_eq!(p.confidence_of(GestureLabel::Touching), 0.81);
        assert_relative_eq!(p.confidence_of(GestureLabel::NotTouching), 0.19);
    }

    #[test]
    #[should_panic(expected = "confidences must sum to 1")]
    fn test_non_normalized_confidences_panic_in_debug() {
        Prediction::new(GestureLabel::Touching, 0.5, 0.8);
    }
}
