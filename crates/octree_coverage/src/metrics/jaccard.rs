//! Region similarity from shared objects.

use crate::coverage::LevelCoverage;
use crate::octree::RegionId;

/// Shared objects over all objects of two regions.
///
/// 1 for a region with itself, 0 when either region is empty.
pub fn jaccard_index(level: &LevelCoverage, r1: RegionId, r2: RegionId) -> f64 {
  if r1 == r2 {
    return 1.0;
  }
  let a = level.region(r1);
  let b = level.region(r2);
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }
  let shared = a.keys().filter(|object| b.contains_key(object)).count() as f64;
  shared / (a.len() as f64 + b.len() as f64 - shared)
}

/// `1 - jaccard_index`.
pub fn jaccard_distance(level: &LevelCoverage, r1: RegionId, r2: RegionId) -> f64 {
  1.0 - jaccard_index(level, r1, r2)
}

/// Coverage-weighted variant of [`jaccard_index`].
///
/// Both coverages of every shared object, over the summed coverage of both
/// regions, over the summed object counts. 0 when nothing is shared.
pub fn weighted_jaccard_index(level: &LevelCoverage, r1: RegionId, r2: RegionId) -> f64 {
  if r1 == r2 {
    return 1.0;
  }
  let a = level.region(r1);
  let b = level.region(r2);
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }

  let shared: f64 = a
    .iter()
    .filter_map(|(object, ca)| b.get(object).map(|cb| ca + cb))
    .sum();
  if shared == 0.0 {
    return 0.0;
  }

  let sum_a: f64 = a.values().sum();
  let sum_b: f64 = b.values().sum();
  shared / (sum_a + sum_b) / (a.len() + b.len()) as f64
}

/// Jaccard index of every region pair of a level.
///
/// A level with a single region yields `[[1.0]]`.
pub fn jaccard_matrix(level: &LevelCoverage) -> Vec<Vec<f64>> {
  let n = level.region_count();
  (0..n)
    .map(|r1| (0..n).map(|r2| jaccard_index(level, r1, r2)).collect())
    .collect()
}
