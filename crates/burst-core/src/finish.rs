//! Lightweight grayscale finishing for merged mosaic frames: black/white
//! level normalization, gain, and sRGB gamma encode. The full demosaic and
//! color pipeline lives outside this crate.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::frame::Frame;

// sRGB encode constants scaled to 16-bit samples.
const GAMMA_CUTOFF: f32 = 200.0; // ceil(0.00304 * 65535)
const GAMMA_TOE: f32 = 12.92;
const GAMMA_POW: f32 = 0.416_667; // 1 / 2.4
const GAMMA_FAC: f32 = 680.552_9; // 1.055 * 65535^(1 - 1/2.4)
const GAMMA_CON: f32 = -3_604.425; // -0.055 * 65535

// Inverse transform constants.
const INV_CUTOFF: f32 = 2_575.0;
const INV_TOE: f32 = 0.077_399_4; // 1 / 12.92
const INV_POW: f32 = 2.4;
const INV_FAC: f32 = 57_632.492; // 65535 / 1.055^2.4
const INV_CON: f32 = 0.055;

/// Parameters of the finishing pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinishConfig {
    /// Sensor black level subtracted before scaling.
    pub black_level: u16,
    /// Sensor white level mapped to full scale.
    pub white_level: u16,
    /// Linear gain applied after normalization.
    pub gain: f32,
}

impl Default for FinishConfig {
    fn default() -> Self {
        Self {
            black_level: 0,
            white_level: u16::MAX,
            gain: 1.0,
        }
    }
}

/// sRGB gamma encode of one linear 16-bit sample.
pub fn gamma_correct(v: u16) -> u16 {
    let v = f32::from(v);
    let out = if v < GAMMA_CUTOFF {
        GAMMA_TOE * v
    } else {
        GAMMA_FAC * v.powf(GAMMA_POW) + GAMMA_CON
    };
    out.round().clamp(0.0, f32::from(u16::MAX)) as u16
}

/// Inverse of [`gamma_correct`].
pub fn gamma_inverse(v: u16) -> u16 {
    let vf = f32::from(v);
    let out = if vf < INV_CUTOFF {
        INV_TOE * vf
    } else {
        (vf / f32::from(u16::MAX) + INV_CON).powf(INV_POW) * INV_FAC
    };
    out.round().clamp(0.0, f32::from(u16::MAX)) as u16
}

/// Normalize, apply gain, and gamma-encode a merged frame for display.
pub fn finish(frame: &Frame, config: &FinishConfig) -> Frame {
    let black = f32::from(config.black_level);
    let white = f32::from(config.white_level);
    let range = (white - black).max(1.0);
    let full = f32::from(u16::MAX);

    let data: Array2<u16> = frame.data.mapv(|v| {
        let linear = ((f32::from(v) - black) / range * config.gain * full)
            .round()
            .clamp(0.0, full) as u16;
        gamma_correct(linear)
    });

    Frame::new(data, frame.original_bit_depth)
}
