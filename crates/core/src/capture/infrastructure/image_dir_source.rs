use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

/// Adapts a directory of still images to the [`FrameSource`] interface.
///
/// Capture cycles through the files in lexicographic order, wrapping around
/// at the end. Useful for demos and integration runs without a camera.
pub struct ImageDirSource {
    paths: Vec<PathBuf>,
    next: usize,
    sequence: u64,
}

impl ImageDirSource {
    pub fn open(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_image(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(format!("No images found in {}", dir.display()).into());
        }

        Ok(Self {
            paths,
            next: 0,
            sequence: 0,
        })
    }

    pub fn image_count(&self) -> usize {
        self.paths.len()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl FrameSource for ImageDirSource {
    fn capture(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        let path = &self.paths[self.next];
        self.next = (self.next + 1) % self.paths.len();

        let rgb = image::open(path)
            .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();

        let frame = Frame::new(rgb.into_raw(), width, height, self.sequence);
        self.sequence += 1;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, name: &str, red: u8) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(4, 4);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([red, 0, 0]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_empty_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ImageDirSource::open(dir.path()).is_err());
    }

    #[test]
    fn test_open_ignores_non_images() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "a.png", 10);
        std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();

        let source = ImageDirSource::open(dir.path()).unwrap();
        assert_eq!(source.image_count(), 1);
    }

    #[test]
    fn test_capture_cycles_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "b.png", 20);
        write_test_image(dir.path(), "a.png", 10);

        let mut source = ImageDirSource::open(dir.path()).unwrap();
        assert_eq!(source.capture().unwrap().pixel(0, 0)[0], 10);
        assert_eq!(source.capture().unwrap().pixel(0, 0)[0], 20);
        // Wraps around
        assert_eq!(source.capture().unwrap().pixel(0, 0)[0], 10);
    }

    #[test]
    fn test_capture_assigns_increasing_sequence() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "a.png", 10);

        let mut source = ImageDirSource::open(dir.path()).unwrap();
        assert_eq!(source.capture().unwrap().sequence(), 0);
        assert_eq!(source.capture().unwrap().sequence(), 1);
        assert_eq!(source.capture().unwrap().sequence(), 2);
    }

    #[test]
    fn test_capture_decodes_rgb() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "a.png", 200);

        let mut source = ImageDirSource::open(dir.path()).unwrap();
        let frame = source.capture().unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.data().len(), 4 * 4 * 3);
    }
}
