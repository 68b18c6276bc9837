//! Hierarchical coarse-to-fine tile alignment.
//!
//! Every alternate frame is aligned against the reference one pyramid
//! level at a time, coarsest first. Each level refines the previous
//! level's per-tile offsets with a small exhaustive search; the finest
//! level's field is scaled back to native pixel units for the merger.

mod layer;

pub use layer::align_layer;

use ndarray::Array2;
use rayon::prelude::*;

use crate::config::AlignConfig;
use crate::pyramid::Pyramid;

/// Integer tile displacement in one pyramid level's pixel units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileOffset {
    pub x: i32,
    pub y: i32,
}

impl TileOffset {
    pub fn clamp(self, bound: i32) -> Self {
        Self {
            x: self.x.clamp(-bound, bound),
            y: self.y.clamp(-bound, bound),
        }
    }

    pub fn scale(self, factor: i32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Per-tile displacement estimates for one alternate frame at one pyramid
/// level, indexed (ty, tx).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplacementField {
    pub offsets: Array2<TileOffset>,
}

impl DisplacementField {
    pub fn zero(tiles_x: usize, tiles_y: usize) -> Self {
        Self {
            offsets: Array2::from_elem((tiles_y, tiles_x), TileOffset::default()),
        }
    }

    pub fn tiles_x(&self) -> usize {
        self.offsets.ncols()
    }

    pub fn tiles_y(&self) -> usize {
        self.offsets.nrows()
    }
}

/// Dimensions of the half-overlapping tile grid covering an image of the
/// given size. Never degenerates below one tile; mirrored sampling covers
/// the remainder.
pub fn tile_grid_dims(width: usize, height: usize, tile_size: usize) -> (usize, usize) {
    let step = tile_size / 2;
    (
        (width / step).saturating_sub(1).max(1),
        (height / step).saturating_sub(1).max(1),
    )
}

/// Align every alternate against the reference, producing one
/// native-resolution displacement field per alternate on the native
/// half-overlap tile grid.
pub fn align_burst(
    reference: &Pyramid,
    alternates: &[Pyramid],
    native_dims: (usize, usize),
    config: &AlignConfig,
) -> Vec<DisplacementField> {
    alternates
        .par_iter()
        .map(|alternate| align_one(reference, alternate, native_dims, config))
        .collect()
}

fn align_one(
    reference: &Pyramid,
    alternate: &Pyramid,
    native_dims: (usize, usize),
    config: &AlignConfig,
) -> DisplacementField {
    let levels = config.pyramid_levels;
    let bounds = config.clamp_bounds();

    // Zero seed field on the coarsest level's grid.
    let coarsest = &reference.levels[levels - 1];
    let (tiles_x, tiles_y) = tile_grid_dims(coarsest.ncols(), coarsest.nrows(), config.tile_size);
    let mut field = DisplacementField::zero(tiles_x, tiles_y);

    // Levels are strictly sequential: each seed depends on the previous
    // level's full output.
    for level in (0..levels).rev() {
        field = align_layer(
            &reference.levels[level],
            &alternate.levels[level],
            &field,
            bounds[level],
            config,
        );
    }

    // Undo the initial 2x box downsample and spread the finest field onto
    // the native half-overlap grid consumed by the merger.
    let (width, height) = native_dims;
    let (native_tx, native_ty) = tile_grid_dims(width, height, config.tile_size);
    let finest = field;
    let offsets = Array2::from_shape_fn((native_ty, native_tx), |(ty, tx)| {
        let fy = (ty / 2).min(finest.tiles_y() - 1);
        let fx = (tx / 2).min(finest.tiles_x() - 1);
        finest.offsets[[fy, fx]].scale(2)
    });

    DisplacementField { offsets }
}
