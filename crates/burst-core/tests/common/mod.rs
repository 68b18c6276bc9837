#![allow(dead_code)]

use ndarray::Array2;

use burst_core::frame::Frame;

/// Deterministic pseudo-random noise frame (xorshift64, no external RNG).
pub fn noise_frame(width: usize, height: usize, seed: u64) -> Frame {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut data = Array2::<u16>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            data[[y, x]] = (state >> 48) as u16;
        }
    }
    Frame::new(data, 16)
}

/// Copy of `frame` with its content moved by (dx, dy); vacated pixels wrap
/// around, so only the border region differs from a pure translation.
pub fn shifted_frame(frame: &Frame, dx: isize, dy: isize) -> Frame {
    let h = frame.height() as isize;
    let w = frame.width() as isize;
    let data = Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
        let sy = (y as isize - dy).rem_euclid(h) as usize;
        let sx = (x as isize - dx).rem_euclid(w) as usize;
        frame.data[[sy, sx]]
    });
    Frame::new(data, 16)
}

/// Frame filled with a single value.
pub fn constant_frame(width: usize, height: usize, value: u16) -> Frame {
    Frame::new(Array2::from_elem((height, width), value), 16)
}

/// Smooth diagonal ramp, useful as a clean base signal.
pub fn ramp_frame(width: usize, height: usize) -> Frame {
    let data = Array2::from_shape_fn((height, width), |(y, x)| {
        (20_000 + 40 * (x + y)).min(u16::MAX as usize) as u16
    });
    Frame::new(data, 16)
}

/// `base` with bounded uniform noise in [-8, 8] added per pixel.
pub fn noisy_copy(base: &Frame, seed: u64) -> Frame {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut data = base.data.clone();
    for v in data.iter_mut() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let noise = ((state >> 48) % 17) as i32 - 8;
        *v = (i32::from(*v) + noise).clamp(0, i32::from(u16::MAX)) as u16;
    }
    Frame::new(data, 16)
}

/// Mean squared error between two frames, in f64.
pub fn mse(a: &Frame, b: &Frame) -> f64 {
    let diff_sum: f64 = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(&p, &q)| {
            let d = f64::from(p) - f64::from(q);
            d * d
        })
        .sum();
    diff_sum / (a.width() * a.height()) as f64
}
