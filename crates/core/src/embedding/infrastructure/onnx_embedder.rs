use std::path::Path;

use crate::embedding::domain::embedder::Embedder;
use crate::shared::feature_vector::FeatureVector;
use crate::shared::frame::Frame;

const INPUT_SIZE: usize = 224;

// ImageNet channel statistics expected by MobileNetV2.
const NORM_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const NORM_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// MobileNetV2 embedder using ONNX Runtime.
///
/// The network's output activations serve as the frame embedding; vectors
/// are L2-normalized so distances are comparable across frames.
pub struct OnnxEmbedder {
    session: ort::session::Session,
}

impl OnnxEmbedder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let intra_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let session = ort::session::Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_inter_threads(1)?
            .with_intra_threads(intra_threads)?
            .commit_from_file(model_path)?;
        Ok(Self { session })
    }
}

impl Embedder for OnnxEmbedder {
    fn embed(&mut self, frame: &Frame) -> Result<FeatureVector, Box<dyn std::error::Error>> {
        let tensor = preprocess(frame);
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let activations = outputs[0].try_extract_array::<f32>()?;
        let slice = activations
            .as_slice()
            .ok_or("Cannot get embedding slice")?;

        let mut vector = FeatureVector::new(slice.to_vec());
        vector.l2_normalize();
        Ok(vector)
    }
}

/// Resize to 224x224 (nearest neighbor), normalize, NCHW layout.
fn preprocess(frame: &Frame) -> ndarray::Array4<f32> {
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;
    let data = frame.data();

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            let offset = (src_y * src_w + src_x) * 3;
            for c in 0..3 {
                let value = data[offset + c] as f32 / 255.0;
                tensor[[0, c, y, x]] = (value - NORM_MEAN[c]) / NORM_STD[c];
            }
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(
            vec![value; (width * height * 3) as usize],
            width,
            height,
            0,
        )
    }

    #[test]
    fn test_preprocess_shape() {
        let frame = uniform_frame(64, 48, 0);
        let tensor = preprocess(&frame);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_normalizes_channels() {
        // All-white input: each channel becomes (1.0 - mean) / std
        let frame = uniform_frame(8, 8, 255);
        let tensor = preprocess(&frame);
        for c in 0..3 {
            let expected = (1.0 - NORM_MEAN[c]) / NORM_STD[c];
            assert_relative_eq!(tensor[[0, c, 0, 0]], expected);
            assert_relative_eq!(tensor[[0, c, 223, 223]], expected);
        }
    }

    #[test]
    fn test_preprocess_upscales_small_frames() {
        // 1x1 red pixel fills the whole tensor
        let frame = Frame::new(vec![255, 0, 0], 1, 1, 0);
        let tensor = preprocess(&frame);
        let red = (1.0 - NORM_MEAN[0]) / NORM_STD[0];
        let zero_g = (0.0 - NORM_MEAN[1]) / NORM_STD[1];
        assert_relative_eq!(tensor[[0, 0, 100, 100]], red);
        assert_relative_eq!(tensor[[0, 1, 100, 100]], zero_g);
    }
}
