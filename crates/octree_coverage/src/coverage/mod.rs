//! Coverage calculation: the fraction of every object inside every region
//! of every octree level.
//!
//! ```text
//! objects ──► segments ──► locate ends ──► same region? ──► whole segment
//!                                             │
//!                                             └──► clip per region (box hits)
//! ```
//!
//! Levels are independent. They run one after the other, or on the rayon
//! pool when [`CoverageConfig::parallel_levels`] is set; either way the map
//! is assembled only after every level finished.

pub mod calculator;
pub mod intersect;
pub mod map;

use rayon::prelude::*;
use serde::Deserialize;
use web_time::Instant;

pub use calculator::{compute_level, CoverageCalculator};
pub use intersect::{BoxHit, COVERAGE_EPSILON};
pub use map::{CoverageMap, LevelCoverage};

use crate::objects::ObjectTable;
use crate::octree::Octree;
use crate::stats::CoverageStats;

/// Coverage calculation knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
  /// Round every contribution to this many decimals.
  pub round_decimals: Option<u32>,
  /// Compute levels on the rayon pool.
  pub parallel_levels: bool,
}

/// Result of [`compute_coverage`].
#[derive(Clone, Debug, Default)]
pub struct CoverageOutput {
  pub map: CoverageMap,
  pub stats: CoverageStats,
}

/// Coverage of every object of `table` in every octree of `octrees`.
///
/// Level `i` of the map belongs to `octrees[i]`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "coverage::compute"))]
pub fn compute_coverage<T: ObjectTable + ?Sized>(
  table: &T,
  octrees: &[Octree],
  config: &CoverageConfig,
) -> CoverageOutput {
  let start = Instant::now();

  let results: Vec<_> = if config.parallel_levels {
    octrees
      .par_iter()
      .map(|octree| compute_level(table, octree, config))
      .collect()
  } else {
    octrees
      .iter()
      .map(|octree| compute_level(table, octree, config))
      .collect()
  };

  let (levels, level_stats): (Vec<_>, Vec<_>) = results.into_iter().unzip();
  let stats = CoverageStats {
    levels: level_stats,
    total_us: start.elapsed().as_micros() as u64,
  };

  #[cfg(feature = "tracing")]
  {
    let totals = stats.totals();
    tracing::info!(
      levels = levels.len(),
      objects = table.len(),
      segments = totals.segments,
      fast_path = totals.fast_path_segments,
      unresolved = totals.unresolved_points,
      total_us = stats.total_us,
      "coverage computed"
    );
  }

  CoverageOutput {
    map: CoverageMap::from_levels(levels),
    stats,
  }
}
