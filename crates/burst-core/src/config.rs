use serde::{Deserialize, Serialize};

use crate::consts::{
    DOWNSAMPLE_FACTOR, MERGE_MAX_DIST, MERGE_MIN_DIST, PYRAMID_LEVELS, SEARCH_RADIUS, TILE_SIZE,
};
use crate::error::{BurstError, Result};

/// Parameters of the hierarchical tile alignment search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Tile edge length in pixels (must be even).
    pub tile_size: usize,
    /// Per-level search radius in pixels.
    pub search_radius: i32,
    /// Number of pyramid levels.
    pub pyramid_levels: usize,
    /// Downsample stride between Gaussian pyramid levels.
    pub downsample_factor: i32,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            search_radius: SEARCH_RADIUS,
            pyramid_levels: PYRAMID_LEVELS,
            downsample_factor: DOWNSAMPLE_FACTOR,
        }
    }
}

impl AlignConfig {
    /// Reject parameter combinations the search cannot run with. Called at
    /// the pipeline entry point so bad CLI or TOML values fail up front.
    pub fn validate(&self) -> Result<()> {
        if self.pyramid_levels == 0 {
            return Err(BurstError::InvalidConfig(
                "pyramid_levels must be at least 1".into(),
            ));
        }
        if self.tile_size < 2 || self.tile_size % 2 != 0 {
            return Err(BurstError::InvalidConfig(format!(
                "tile_size must be even and at least 2, got {}",
                self.tile_size
            )));
        }
        if self.search_radius < 0 {
            return Err(BurstError::InvalidConfig(format!(
                "search_radius must be non-negative, got {}",
                self.search_radius
            )));
        }
        if self.downsample_factor < 1 {
            return Err(BurstError::InvalidConfig(format!(
                "downsample_factor must be at least 1, got {}",
                self.downsample_factor
            )));
        }
        Ok(())
    }

    /// Half-tile step between neighboring tile origins.
    pub fn tile_step(&self) -> usize {
        self.tile_size / 2
    }

    /// Seed clamp bound per level, coarsest seeded by the search radius and
    /// widening geometrically toward the finest level so the union of all
    /// searches covers a useful native displacement range.
    pub(crate) fn clamp_bounds(&self) -> Vec<i32> {
        let mut bounds = vec![0i32; self.pyramid_levels];
        bounds[self.pyramid_levels - 1] = self.search_radius;
        for level in (0..self.pyramid_levels - 1).rev() {
            bounds[level] = self.downsample_factor * bounds[level + 1] + self.search_radius;
        }
        bounds
    }
}

/// Parameters of the robustness model used by the temporal merge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Tile distances at or below this map to the maximal weight.
    pub min_dist: f32,
    /// Tile distances at or above this map to zero weight.
    pub max_dist: f32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            min_dist: MERGE_MIN_DIST,
            max_dist: MERGE_MAX_DIST,
        }
    }
}

/// Immutable engine configuration handed in at the pipeline entry point.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub align: AlignConfig,
    #[serde(default)]
    pub merge: MergeConfig,
}
