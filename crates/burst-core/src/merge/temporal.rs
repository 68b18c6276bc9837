use ndarray::Array4;
use rayon::prelude::*;

use crate::align::{tile_grid_dims, DisplacementField};
use crate::config::MergeConfig;
use crate::frame::Burst;
use crate::pyramid::mirror;

/// Per-tile merged values, indexed (ty, tx, yi, xi). Tiles still overlap
/// by half their edge; the spatial merge flattens them.
#[derive(Clone, Debug)]
pub struct MergedTiles {
    pub data: Array4<f32>,
    pub tile_size: usize,
}

impl MergedTiles {
    pub fn tiles_x(&self) -> usize {
        self.data.dim().1
    }

    pub fn tiles_y(&self) -> usize {
        self.data.dim().0
    }
}

/// Robustness weight for one tile given its mean absolute distance from
/// the reference: maximal at or below `min_dist`, zero at or above
/// `max_dist`, inverse in between. Poorly aligned or occluded tiles are
/// excluded rather than blurred in.
fn robustness_weight(dist: f32, config: &MergeConfig) -> f32 {
    if dist >= config.max_dist {
        0.0
    } else {
        1.0 / (dist - config.min_dist).max(1.0)
    }
}

/// Fuse every tile of the burst across frames.
///
/// One distance per (tile, alternate) pair keeps the weight computation at
/// O(tiles); the value blend is per pixel. The reference contributes with
/// an implicit weight of 1, so a tile whose alternates are all excluded
/// falls back to the reference.
pub fn temporal_merge(
    burst: &Burst,
    fields: &[DisplacementField],
    config: &MergeConfig,
    tile_size: usize,
) -> MergedTiles {
    let reference = &burst.reference().data;
    let (h, w) = reference.dim();
    let (tiles_x, tiles_y) = tile_grid_dims(w, h, tile_size);
    let tile = tile_size;
    let step = tile / 2;
    let pixels = (tile * tile) as f32;

    let rows: Vec<Vec<Vec<f32>>> = (0..tiles_y)
        .into_par_iter()
        .map(|ty| {
            let y0 = (ty * step) as isize;
            (0..tiles_x)
                .map(|tx| {
                    let x0 = (tx * step) as isize;

                    // Whole-tile weights must be known before any pixel of
                    // this tile is blended.
                    let weights: Vec<f32> = burst
                        .alternates()
                        .iter()
                        .zip(fields)
                        .map(|(alternate, field)| {
                            let off = field.offsets[[ty, tx]];
                            let mut acc = 0u64;
                            for j in 0..tile as isize {
                                let ry = mirror(y0 + j, h);
                                let ay = mirror(y0 + j + off.y as isize, h);
                                for i in 0..tile as isize {
                                    let r = i64::from(reference[[ry, mirror(x0 + i, w)]]);
                                    let a = i64::from(
                                        alternate.data[[ay, mirror(x0 + i + off.x as isize, w)]],
                                    );
                                    acc += r.abs_diff(a);
                                }
                            }
                            robustness_weight(acc as f32 / pixels, config)
                        })
                        .collect();

                    let mut values = vec![0.0f32; tile * tile];
                    for j in 0..tile as isize {
                        let ry = mirror(y0 + j, h);
                        for i in 0..tile as isize {
                            let mut num = f32::from(reference[[ry, mirror(x0 + i, w)]]);
                            let mut den = 1.0f32;
                            for ((alternate, field), &weight) in
                                burst.alternates().iter().zip(fields).zip(&weights)
                            {
                                if weight == 0.0 {
                                    continue;
                                }
                                let off = field.offsets[[ty, tx]];
                                let ay = mirror(y0 + j + off.y as isize, h);
                                let ax = mirror(x0 + i + off.x as isize, w);
                                num += weight * f32::from(alternate.data[[ay, ax]]);
                                den += weight;
                            }
                            values[(j as usize) * tile + i as usize] = num / den;
                        }
                    }
                    values
                })
                .collect()
        })
        .collect();

    let mut data = Array4::<f32>::zeros((tiles_y, tiles_x, tile, tile));
    for (ty, row) in rows.into_iter().enumerate() {
        for (tx, values) in row.into_iter().enumerate() {
            for yi in 0..tile {
                for xi in 0..tile {
                    data[[ty, tx, yi, xi]] = values[yi * tile + xi];
                }
            }
        }
    }

    MergedTiles { data, tile_size }
}
