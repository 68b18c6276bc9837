/// Tile edge length in pixels. Even by construction; the same edge applies
/// at every pyramid level because downsampling shrinks pixel footprint,
/// not the logical tile.
pub const TILE_SIZE: usize = 16;

/// Integer search radius per pyramid level; candidates form a 9x9 window
/// around the propagated seed offset.
pub const SEARCH_RADIUS: i32 = 4;

/// Level-to-level Gaussian downsample stride between pyramid levels 1..L.
pub const DOWNSAMPLE_FACTOR: i32 = 4;

/// Number of pyramid levels. Level 0 is the initial 2x box downsample,
/// each later level a further 4x Gaussian downsample.
pub const PYRAMID_LEVELS: usize = 4;

/// Hard cap on burst length (1 reference + 9 alternates). Longer bursts
/// are truncated with a warning rather than rejected.
pub const MAX_BURST_FRAMES: usize = 10;

/// Tile mean-absolute-difference at or below this contributes the maximal
/// robustness weight, in 16-bit sample units.
pub const MERGE_MIN_DIST: f32 = 10.0;

/// Tile mean-absolute-difference at or above this contributes zero weight.
pub const MERGE_MAX_DIST: f32 = 300.0;

/// 5x5 binomial-like kernel for the 4x Gaussian downsample.
pub const GAUSS_KERNEL: [[u32; 5]; 5] = [
    [2, 4, 5, 4, 2],
    [4, 9, 12, 9, 4],
    [5, 12, 15, 12, 5],
    [4, 9, 12, 9, 4],
    [2, 4, 5, 4, 2],
];

/// Normalization divisor for [`GAUSS_KERNEL`]; the weights sum to exactly
/// this value.
pub const GAUSS_DIVISOR: u32 = 256;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;
