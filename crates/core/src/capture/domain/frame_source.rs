use crate::shared::frame::Frame;

/// Domain interface for on-demand frame acquisition.
///
/// Implementations hold device or decoder state, hence `&mut self`.
/// `capture` fails when no frame can be produced (stream not ready,
/// device gone, decode error).
pub trait FrameSource: Send {
    fn capture(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;
}
