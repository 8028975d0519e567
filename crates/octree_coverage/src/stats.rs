//! Statistics from octree builds and coverage computation.
//!
//! Counters are filled in while a level is processed and never drive any
//! result; they exist for diagnostics and benchmarks.

/// Coverage statistics for one octree level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
  /// Segments processed (ellipsoid rays and polyline pieces included).
  pub segments: usize,
  /// Segments whose ends share a region.
  pub fast_path_segments: usize,
  /// Region boxes tested for intersections after the broad phase.
  pub box_tests: usize,
  /// Segment ends found only after nudging them into the tree.
  pub recovered_points: usize,
  /// Segment ends outside the tree even after nudging.
  pub unresolved_points: usize,
  /// Wall time spent on the level, in microseconds.
  pub elapsed_us: u64,
}

impl LevelStats {
  /// Fraction of segments resolved without any box test.
  #[inline]
  pub fn fast_path_ratio(&self) -> f64 {
    if self.segments == 0 {
      return 0.0;
    }
    self.fast_path_segments as f64 / self.segments as f64
  }

  /// Add another level's counters into this one.
  pub fn accumulate(&mut self, other: &LevelStats) {
    self.segments += other.segments;
    self.fast_path_segments += other.fast_path_segments;
    self.box_tests += other.box_tests;
    self.recovered_points += other.recovered_points;
    self.unresolved_points += other.unresolved_points;
    self.elapsed_us += other.elapsed_us;
  }
}

/// Coverage statistics for every level of one computation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageStats {
  /// Per-level counters, indexed by level.
  pub levels: Vec<LevelStats>,
  /// Wall time of the whole computation, in microseconds.
  pub total_us: u64,
}

impl CoverageStats {
  /// Counters summed over all levels (`elapsed_us` is the sum of level
  /// times, which exceeds `total_us` when levels ran in parallel).
  pub fn totals(&self) -> LevelStats {
    let mut totals = LevelStats::default();
    for level in &self.levels {
      totals.accumulate(level);
    }
    totals
  }
}

/// Timing of one full analysis session build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
  /// Octree build time per level, in microseconds.
  pub octree_build_us: Vec<u64>,
  /// Leaf region count per level.
  pub regions_per_level: Vec<usize>,
  /// Coverage statistics of the session.
  pub coverage: CoverageStats,
  /// Wall time from start to completion, in microseconds.
  pub total_us: u64,
}
