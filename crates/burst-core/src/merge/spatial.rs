use ndarray::Array2;
use rayon::prelude::*;

use crate::frame::Frame;

use super::MergedTiles;

/// Raised-cosine tile window: w(i) = 0.5 - 0.5*cos(2*pi*(i + 0.5)/T).
/// With half-tile overlap, w(i) + w(i + T/2) == 1 identically, so the four
/// contributions at every interior pixel sum to exactly 1.
pub fn window_weights(tile_size: usize) -> Vec<f32> {
    (0..tile_size)
        .map(|i| {
            0.5 - 0.5 * (std::f32::consts::TAU * (i as f32 + 0.5) / tile_size as f32).cos()
        })
        .collect()
}

/// Blend the overlapping tile grid into one flat output frame.
///
/// Each output pixel gathers the four tiles covering it (clamped tile
/// indices at the borders), weighting each tile's value by the product of
/// the horizontal and vertical window weights and normalizing by the
/// weight total. Accumulation is f32; the narrow back to u16 saturates.
pub fn spatial_merge(tiles: &MergedTiles, width: usize, height: usize, bit_depth: u8) -> Frame {
    let tile = tiles.tile_size;
    let step = tile / 2;
    let window = window_weights(tile);
    let tiles_x = tiles.tiles_x();
    let tiles_y = tiles.tiles_y();

    let rows: Vec<Vec<u16>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let ty_hi = (y / step).min(tiles_y - 1);
            let ty_lo = (y / step).saturating_sub(1).min(tiles_y - 1);
            (0..width)
                .map(|x| {
                    let tx_hi = (x / step).min(tiles_x - 1);
                    let tx_lo = (x / step).saturating_sub(1).min(tiles_x - 1);

                    let mut num = 0.0f32;
                    let mut den = 0.0f32;
                    for ty in [ty_lo, ty_hi] {
                        let yi = (y - ty * step).min(tile - 1);
                        for tx in [tx_lo, tx_hi] {
                            let xi = (x - tx * step).min(tile - 1);
                            let weight = window[yi] * window[xi];
                            num += weight * tiles.data[[ty, tx, yi, xi]];
                            den += weight;
                        }
                    }
                    (num / den).round().clamp(0.0, f32::from(u16::MAX)) as u16
                })
                .collect()
        })
        .collect();

    let mut data = Array2::<u16>::zeros((height, width));
    for (y, row) in rows.into_iter().enumerate() {
        for (x, v) in row.into_iter().enumerate() {
            data[[y, x]] = v;
        }
    }

    Frame::new(data, bit_depth)
}
