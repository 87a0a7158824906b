/// Fixed-length embedding of one frame, produced by an [`Embedder`] and
/// consumed by a classifier.
///
/// [`Embedder`]: crate::embedding::domain::embedder::Embedder
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn squared_distance(&self, other: &FeatureVector) -> f32 {
        debug_assert_eq!(self.len(), other.len(), "dimension mismatch");
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Scales to unit length. Zero vectors are left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm: f32 = self.0.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in self.0.iter_mut() {
                *x /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_squared_distance() {
        let a = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let b = FeatureVector::new(vec![1.0, 0.0, 0.0]);
        assert_relative_eq!(a.squared_distance(&b), 13.0);
    }

    #[test]
    fn test_squared_distance_to_self_is_zero() {
        let a = FeatureVector::new(vec![0.5, -0.5, 2.0]);
        assert_relative_eq!(a.squared_distance(&a), 0.0);
    }

    #[test]
    fn test_l2_normalize_unit_length() {
        let mut v = FeatureVector::new(vec![3.0, 4.0]);
        v.l2_normalize();
        assert_relative_eq!(v.as_slice()[0], 0.6);
        assert_relative_eq!(v.as_slice()[1], 0.8);
    }

    #[test]
    fn test_l2_normalize_zero_vector_unchanged() {
        let mut v = FeatureVector::new(vec![0.0, 0.0, 0.0]);
        v.l2_normalize();
        assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
    }
}
