use std::path::Path;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Live camera capture via ffmpeg-next (libavformat + libavdevice).
///
/// Opens the device node (e.g. `/dev/video0`) and decodes one frame per
/// `capture` call, converted to RGB24. Frames between calls are dropped by
/// the driver; the source always returns the next frame it can decode.
pub struct CameraFrameSource {
    input_ctx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    video_stream_index: usize,
    width: u32,
    height: u32,
    sequence: u64,
}

// Safety: CameraFrameSource is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for CameraFrameSource {}

impl CameraFrameSource {
    pub fn open(device: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(device)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream on capture device")?;
        let video_stream_index = stream.index();

        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        Ok(Self {
            input_ctx: ictx,
            decoder,
            scaler,
            video_stream_index,
            width,
            height,
            sequence: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn try_receive(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return Ok(None);
        }

        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
        self.scaler.run(&decoded, &mut rgb_frame)?;

        let pixels = extract_rgb_pixels(&rgb_frame, self.width, self.height);
        let frame = Frame::new(pixels, self.width, self.height, self.sequence);
        self.sequence += 1;
        Ok(Some(frame))
    }
}

impl FrameSource for CameraFrameSource {
    fn capture(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        // A live device delivers packets indefinitely; read until one
        // decodes into a full picture.
        loop {
            let mut packet = ffmpeg_next::codec::packet::Packet::empty();
            match packet.read(&mut self.input_ctx) {
                Ok(()) => {}
                Err(ffmpeg_next::Error::Eof) => return Err("Camera stream ended".into()),
                Err(e) => return Err(Box::new(e)),
            }

            if packet.stream() != self.video_stream_index {
                continue;
            }

            self.decoder.send_packet(&packet)?;
            if let Some(frame) = self.try_receive()? {
                return Ok(frame);
            }
        }
    }
}

/// Copies pixel rows out of an ffmpeg RGB frame, dropping stride padding.
fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}
