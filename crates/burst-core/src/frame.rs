use ndarray::Array2;

use crate::consts::MAX_BURST_FRAMES;
use crate::error::{BurstError, Result};

/// A single-channel mosaic intensity frame.
/// Pixel samples are u16, row-major, shape = (height, width).
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array2<u16>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<u16>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// One reference frame plus an ordered run of alternates, all sharing the
/// reference's dimensions. The reference is frame 0 for the lifetime of a
/// run.
#[derive(Clone, Debug)]
pub struct Burst {
    frames: Vec<Frame>,
}

impl Burst {
    /// Build a burst from decoded frames; the first frame is the reference.
    ///
    /// Fewer than 2 frames or any dimension mismatch is a fatal
    /// construction error. Bursts longer than [`MAX_BURST_FRAMES`] are
    /// truncated with a warning.
    pub fn new(mut frames: Vec<Frame>) -> Result<Self> {
        if frames.len() < 2 {
            return Err(BurstError::TooFewFrames {
                count: frames.len(),
            });
        }
        if frames.len() > MAX_BURST_FRAMES {
            tracing::warn!(
                total = frames.len(),
                kept = MAX_BURST_FRAMES,
                "burst too long, ignoring extra frames"
            );
            frames.truncate(MAX_BURST_FRAMES);
        }

        let (height, width) = frames[0].data.dim();
        for (index, frame) in frames.iter().enumerate().skip(1) {
            let (got_height, got_width) = frame.data.dim();
            if (got_height, got_width) != (height, width) {
                return Err(BurstError::DimensionMismatch {
                    index,
                    expected_width: width,
                    expected_height: height,
                    got_width,
                    got_height,
                });
            }
        }

        Ok(Self { frames })
    }

    pub fn reference(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn alternates(&self) -> &[Frame] {
        &self.frames[1..]
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn width(&self) -> usize {
        self.frames[0].width()
    }

    pub fn height(&self) -> usize {
        self.frames[0].height()
    }
}
