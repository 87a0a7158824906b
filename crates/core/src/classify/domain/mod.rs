pub mod classifier;
pub mod gesture_label;
pub mod prediction;
