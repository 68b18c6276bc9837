use ndarray::Array2;
use rayon::prelude::*;

use crate::config::AlignConfig;
use crate::pyramid::mirror;

use super::{tile_grid_dims, DisplacementField, TileOffset};

/// Index of the nearest tile in the coarser level's grid. The half-tile
/// step indexing shifts by one before dividing by the downsample factor.
fn prev_tile(t: usize, factor: i32) -> isize {
    (t as isize - 1) / factor as isize
}

/// Refine one pyramid level's displacement field for a single alternate.
///
/// Per tile: the coarser field's offset (clamped to `seed_bound`, scaled
/// into this level's pixel units) seeds an exhaustive integer search over
/// a (2r+1)x(2r+1) window. Score is the sum of squared differences over
/// the tile, mirror-sampled at the frame edges. The first strict minimum
/// in row-major scan order wins; a tile where no candidate beats the seed
/// keeps the seed, which is a legal output, not an error.
pub fn align_layer(
    reference: &Array2<u16>,
    alternate: &Array2<u16>,
    prev: &DisplacementField,
    seed_bound: i32,
    config: &AlignConfig,
) -> DisplacementField {
    let (h, w) = reference.dim();
    let (tiles_x, tiles_y) = tile_grid_dims(w, h, config.tile_size);
    let tile = config.tile_size;
    let step = config.tile_step();
    let radius = config.search_radius;
    let factor = config.downsample_factor;

    // A level smaller than one tile samples mostly its own mirror image,
    // where aliased candidates can score a spurious zero. Propagate the
    // scaled seeds unchanged instead of searching.
    if w < tile || h < tile {
        let offsets = Array2::from_shape_fn((tiles_y, tiles_x), |(ty, tx)| {
            let py = prev_tile(ty, factor).clamp(0, prev.tiles_y() as isize - 1) as usize;
            let px = prev_tile(tx, factor).clamp(0, prev.tiles_x() as isize - 1) as usize;
            prev.offsets[[py, px]].clamp(seed_bound).scale(factor)
        });
        return DisplacementField { offsets };
    }

    let rows: Vec<Vec<TileOffset>> = (0..tiles_y)
        .into_par_iter()
        .map(|ty| {
            let py = prev_tile(ty, factor).clamp(0, prev.tiles_y() as isize - 1) as usize;
            let y0 = (ty * step) as isize;

            (0..tiles_x)
                .map(|tx| {
                    let px = prev_tile(tx, factor).clamp(0, prev.tiles_x() as isize - 1) as usize;
                    let seed = prev.offsets[[py, px]].clamp(seed_bound).scale(factor);
                    let x0 = (tx * step) as isize;

                    let mut best = seed;
                    let mut best_score = u64::MAX;
                    for dy in -radius..=radius {
                        for dx in -radius..=radius {
                            let score = tile_score(
                                reference,
                                alternate,
                                x0,
                                y0,
                                seed.x as isize + dx as isize,
                                seed.y as isize + dy as isize,
                                tile,
                            );
                            if score < best_score {
                                best_score = score;
                                best = TileOffset {
                                    x: seed.x + dx,
                                    y: seed.y + dy,
                                };
                            }
                        }
                    }
                    best
                })
                .collect()
        })
        .collect();

    let mut offsets = Array2::from_elem((tiles_y, tiles_x), TileOffset::default());
    for (ty, row) in rows.into_iter().enumerate() {
        for (tx, offset) in row.into_iter().enumerate() {
            offsets[[ty, tx]] = offset;
        }
    }

    DisplacementField { offsets }
}

fn tile_score(
    reference: &Array2<u16>,
    alternate: &Array2<u16>,
    x0: isize,
    y0: isize,
    off_x: isize,
    off_y: isize,
    tile: usize,
) -> u64 {
    let (h, w) = reference.dim();
    let mut score = 0u64;
    for j in 0..tile as isize {
        let ry = mirror(y0 + j, h);
        let ay = mirror(y0 + j + off_y, h);
        for i in 0..tile as isize {
            let r = i64::from(reference[[ry, mirror(x0 + i, w)]]);
            let a = i64::from(alternate[[ay, mirror(x0 + i + off_x, w)]]);
            let d = r - a;
            score += (d * d) as u64;
        }
    }
    score
}
