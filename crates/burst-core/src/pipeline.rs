//! End-to-end align-and-merge pipeline.

use rayon::prelude::*;
use tracing::info;

use crate::align::{align_burst, tile_grid_dims};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::frame::{Burst, Frame};
use crate::merge::{spatial_merge, temporal_merge};
use crate::pyramid::{build_pyramid, Pyramid};

/// Stack a burst into one denoised frame at the reference's resolution.
///
/// A deterministic batch computation: identical input and configuration
/// produce bit-identical output. Precondition violations (invalid
/// configuration, burst shape, frame too small for the pyramid depth)
/// surface here before any search begins; there are no recoverable errors
/// past that point.
pub fn align_and_merge(burst: &Burst, config: &EngineConfig) -> Result<Frame> {
    config.align.validate()?;

    let width = burst.width();
    let height = burst.height();

    info!(
        frames = burst.len(),
        width,
        height,
        levels = config.align.pyramid_levels,
        "building pyramids"
    );
    let pyramids: Vec<Pyramid> = burst
        .frames()
        .par_iter()
        .map(|frame| build_pyramid(frame, config.align.pyramid_levels))
        .collect::<Result<_>>()?;

    let (reference, alternates) = pyramids.split_first().expect("burst has at least 2 frames");

    info!(alternates = alternates.len(), "aligning alternates");
    let fields = align_burst(reference, alternates, (width, height), &config.align);

    let (tiles_x, tiles_y) = tile_grid_dims(width, height, config.align.tile_size);
    info!(tiles_x, tiles_y, "temporal merge");
    let tiles = temporal_merge(burst, &fields, &config.merge, config.align.tile_size);

    info!("spatial merge");
    Ok(spatial_merge(
        &tiles,
        width,
        height,
        burst.reference().original_bit_depth,
    ))
}
