use thiserror::Error;

/// Errors raised by the quantization pipeline. All of them abort the whole
/// request; none are retried internally.
#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("expected 3 color channels, got {0}")]
    ChannelMismatch(usize),

    #[error("pixel buffer length {len} does not match dimensions {width}x{height} with 3 channels")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error("num_colors must be a positive integer, got {0}")]
    InvalidColorCount(usize),
}
