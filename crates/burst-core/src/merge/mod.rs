//! Two-stage robust merge of an aligned burst.
//!
//! The temporal stage fuses each half-overlapping tile across frames with
//! per-tile robustness weights; the spatial stage blends the overlapping
//! tiles into one seamless output frame.

mod spatial;
mod temporal;

pub use spatial::{spatial_merge, window_weights};
pub use temporal::{temporal_merge, MergedTiles};
