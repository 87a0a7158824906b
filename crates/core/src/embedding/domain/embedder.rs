use crate::shared::feature_vector::FeatureVector;
use crate::shared::frame::Frame;

/// Domain interface for frame embedding.
///
/// Maps a frame to a fixed-length feature vector suitable as classifier
/// input. Implementations hold inference sessions, hence `&mut self`.
pub trait Embedder: Send {
    fn embed(&mut self, frame: &Frame) -> Result<FeatureVector, Box<dyn std::error::Error>>;
}
