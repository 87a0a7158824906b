pub const EMBEDDING_MODEL_NAME: &str = "mobilenetv2-10.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/classification/mobilenet/model/mobilenetv2-10.onnx";

pub const DEFAULT_SAMPLES_PER_CLASS: usize = 100;
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 100;
pub const DEFAULT_CLASSIFY_INTERVAL_MS: u64 = 100;

/// A positive detection requires the touching confidence to exceed this.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Neighbors consulted per prediction by the KNN classifier.
pub const KNN_NEIGHBORS: usize = 3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
