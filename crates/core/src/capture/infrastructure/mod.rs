pub mod camera_frame_source;
pub mod image_dir_source;
