use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurstError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Burst needs at least 2 frames, got {count}")]
    TooFewFrames { count: usize },

    #[error("Frame {index} is {got_width}x{got_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        index: usize,
        expected_width: usize,
        expected_height: usize,
        got_width: usize,
        got_height: usize,
    },

    #[error("Frame {width}x{height} is too small for a {levels}-level pyramid")]
    FrameTooSmall {
        width: usize,
        height: usize,
        levels: usize,
    },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BurstError>;
