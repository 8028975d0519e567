//! AnalysisSession - one completed octree + coverage build over an object table.
//!
//! A session owns its octrees and coverage map. It is only ever handed out
//! complete, so every query sees a consistent set of levels.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use web_time::Instant;

use crate::config::AnalysisConfig;
use crate::coverage::{compute_coverage, CoverageMap};
use crate::error::MdsError;
use crate::mds::{smacof, Embedding};
use crate::metrics::{jaccard_distance, FeatureRanges, OctreeMetrics};
use crate::objects::ObjectTable;
use crate::octree::Octree;
use crate::stats::SessionStats;

// =============================================================================
// SessionId - unique identifier
// =============================================================================

static SESSION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque session identifier, unique within the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SessionId(u64);

impl SessionId {
  pub fn new() -> Self {
    Self(SESSION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for SessionId {
  fn default() -> Self {
    Self::new()
  }
}

// =============================================================================
// AnalysisSession<T>
// =============================================================================

/// Octrees, coverage map and feature ranges built from one object table.
///
/// Generic over the table so hot paths stay monomorphized; use
/// `AnalysisSession<dyn ObjectTable>` for runtime flexibility.
pub struct AnalysisSession<T: ObjectTable + ?Sized> {
  pub id: SessionId,
  config: AnalysisConfig,
  table: Arc<T>,
  octrees: Vec<Octree>,
  coverage: CoverageMap,
  ranges: FeatureRanges,
  stats: SessionStats,
}

impl<T: ObjectTable + ?Sized> AnalysisSession<T> {
  /// Build one octree per configured level and the coverage of every
  /// object on every level.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "session::build"))]
  pub fn build(table: Arc<T>, config: &AnalysisConfig) -> Self {
    let start = Instant::now();
    let points = table.sample_points();

    let mut octree_build_us = Vec::with_capacity(config.levels.len());
    let octrees: Vec<Octree> = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("octree_stage", levels = config.levels.len()).entered();
      config
        .levels
        .iter()
        .map(|level| {
          let level_start = Instant::now();
          let octree = Octree::build(&points, level);
          octree_build_us.push(level_start.elapsed().as_micros() as u64);
          octree
        })
        .collect()
    };

    let output = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("coverage_stage").entered();
      compute_coverage(table.as_ref(), &octrees, &config.coverage)
    };

    let ranges = FeatureRanges::from_table(table.as_ref());
    let stats = SessionStats {
      octree_build_us,
      regions_per_level: octrees.iter().map(Octree::leaf_count).collect(),
      coverage: output.stats,
      total_us: start.elapsed().as_micros() as u64,
    };

    #[cfg(feature = "tracing")]
    tracing::info!(
      objects = table.len(),
      points = points.len(),
      regions = ?stats.regions_per_level,
      total_us = stats.total_us,
      "analysis session built"
    );

    Self {
      id: SessionId::new(),
      config: config.clone(),
      table,
      octrees,
      coverage: output.map,
      ranges,
      stats,
    }
  }

  pub fn config(&self) -> &AnalysisConfig {
    &self.config
  }

  pub fn table(&self) -> &T {
    &self.table
  }

  pub fn level_count(&self) -> usize {
    self.octrees.len()
  }

  pub fn octrees(&self) -> &[Octree] {
    &self.octrees
  }

  /// Octree of `level`.
  pub fn octree(&self, level: usize) -> &Octree {
    &self.octrees[level]
  }

  pub fn coverage(&self) -> &CoverageMap {
    &self.coverage
  }

  pub fn feature_ranges(&self) -> &FeatureRanges {
    &self.ranges
  }

  pub fn stats(&self) -> &SessionStats {
    &self.stats
  }

  /// Metrics over this session's coverage, using the configured bin method.
  ///
  /// Metrics cache their results; keep the returned value around instead
  /// of calling this per query.
  pub fn metrics(&self) -> OctreeMetrics<'_, T> {
    OctreeMetrics::new(self.table.as_ref(), &self.coverage, self.ranges.clone())
      .with_bin_method(self.config.histogram.bin_method)
  }

  /// Jaccard distance between every pair of regions of `level`.
  pub fn region_dissimilarities(&self, level: usize) -> Vec<Vec<f64>> {
    let coverage = self.coverage.level(level);
    let n = coverage.region_count();
    (0..n)
      .map(|r1| (0..n).map(|r2| jaccard_distance(coverage, r1, r2)).collect())
      .collect()
  }

  /// Embed the regions of `level` by their Jaccard distances, using the
  /// configured MDS parameters.
  pub fn embed_regions(&self, level: usize) -> Result<Embedding, MdsError> {
    smacof(&self.region_dissimilarities(level), &self.config.mds)
  }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
