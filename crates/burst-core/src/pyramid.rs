//! Multi-level downsampled frame representation for coarse-to-fine search.
//!
//! Level 0 is a 2x2 box downsample of the native mosaic; each later level
//! is a 4x Gaussian-weighted downsample of the previous one. All filters
//! run in unsigned integer arithmetic with round-to-nearest.

use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{GAUSS_DIVISOR, GAUSS_KERNEL, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{BurstError, Result};
use crate::frame::Frame;

/// Downsampled levels of one frame, index 0 the finest. Built once per
/// frame at the start of a run, read-only afterward.
#[derive(Clone, Debug)]
pub struct Pyramid {
    pub levels: Vec<Array2<u16>>,
}

/// Build the pyramid for one frame.
///
/// Fails with [`BurstError::FrameTooSmall`] if any level would have a zero
/// dimension, before any alignment search can observe it.
pub fn build_pyramid(frame: &Frame, levels: usize) -> Result<Pyramid> {
    let mut out: Vec<Array2<u16>> = Vec::with_capacity(levels);
    out.push(box_down2(&frame.data));

    for _ in 1..levels {
        let next = gauss_down4(out.last().expect("pyramid has a level"));
        out.push(next);
    }

    if out.iter().any(|l| l.nrows() == 0 || l.ncols() == 0) {
        return Err(BurstError::FrameTooSmall {
            width: frame.width(),
            height: frame.height(),
            levels,
        });
    }

    Ok(Pyramid { levels: out })
}

/// Mean of each 2x2 block, stride 2.
pub fn box_down2(input: &Array2<u16>) -> Array2<u16> {
    let out_h = input.nrows() / 2;
    let out_w = input.ncols() / 2;

    map_rows(out_h, out_w, |y, x| {
        let mut sum = 0u32;
        for dy in 0..2 {
            for dx in 0..2 {
                sum += u32::from(input[[2 * y + dy, 2 * x + dx]]);
            }
        }
        ((sum + 2) / 4) as u16
    })
}

/// 5x5 Gaussian kernel at stride 4, mirrored edge extension.
pub fn gauss_down4(input: &Array2<u16>) -> Array2<u16> {
    let (h, w) = input.dim();
    let out_h = h / 4;
    let out_w = w / 4;

    map_rows(out_h, out_w, |y, x| {
        let mut sum = 0u32;
        for (ky, row) in GAUSS_KERNEL.iter().enumerate() {
            let sy = mirror(4 * y as isize + ky as isize - 2, h);
            for (kx, &k) in row.iter().enumerate() {
                let sx = mirror(4 * x as isize + kx as isize - 2, w);
                sum += u32::from(input[[sy, sx]]) * k;
            }
        }
        ((sum + GAUSS_DIVISOR / 2) / GAUSS_DIVISOR) as u16
    })
}

/// Reflect an index into [0, n) without repeating the border pixel
/// (-1 maps to 1, n maps to n - 2).
pub(crate) fn mirror(i: isize, n: usize) -> usize {
    let n = n as isize;
    debug_assert!(n > 0);
    if n == 1 {
        return 0;
    }
    let mut i = i;
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

fn map_rows(h: usize, w: usize, f: impl Fn(usize, usize) -> u16 + Sync) -> Array2<u16> {
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<u16>> = (0..h)
            .into_par_iter()
            .map(|y| (0..w).map(|x| f(y, x)).collect())
            .collect();

        let mut out = Array2::<u16>::zeros((h, w));
        for (y, row) in rows.into_iter().enumerate() {
            for (x, v) in row.into_iter().enumerate() {
                out[[y, x]] = v;
            }
        }
        out
    } else {
        Array2::from_shape_fn((h, w), |(y, x)| f(y, x))
    }
}
