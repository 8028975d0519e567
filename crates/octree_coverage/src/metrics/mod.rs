//! Region metrics derived from a coverage map.
//!
//! [`OctreeMetrics`] borrows the object table and the coverage map and
//! computes every metric on first request. Results are cached per key and
//! returned by reference, so repeated queries are free.
//!
//! | Metric | Key | Cache |
//! |---|---|---|
//! | weighted region average | (level, feature) | yes |
//! | Jaccard matrix | level | yes |
//! | region histogram | (level, region, feature) | yes |
//! | max-coverage assignment | all levels | yes |
//! | single Jaccard index / distance | (level, r1, r2) | no |

pub mod histogram;
pub mod jaccard;
pub mod ranges;

use std::sync::OnceLock;

pub use histogram::{BinCountMethod, DescriptiveStats, Histogram, MomentAccumulator};
pub use jaccard::{jaccard_distance, jaccard_index, jaccard_matrix, weighted_jaccard_index};
pub use ranges::FeatureRanges;

use crate::coverage::{CoverageMap, LevelCoverage};
use crate::objects::{ObjectId, ObjectTable};
use crate::octree::RegionId;

/// Every object assigned to the single region it covers most, per level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaxCoverageAssignment {
  /// `levels[level][region]` = objects assigned to `region`.
  levels: Vec<Vec<Vec<ObjectId>>>,
}

impl MaxCoverageAssignment {
  /// Assign every object of `object_count` on every level of `map`.
  ///
  /// Regions are scanned in index order and a strictly larger coverage wins,
  /// so ties go to the lowest region. The scan stops once an object reaches
  /// full coverage. Objects without any coverage go to region 0.
  pub fn compute(map: &CoverageMap, object_count: usize) -> Self {
    let levels = map
      .levels()
      .iter()
      .map(|level| Self::assign_level(level, object_count))
      .collect();
    Self { levels }
  }

  fn assign_level(level: &LevelCoverage, object_count: usize) -> Vec<Vec<ObjectId>> {
    let mut regions = vec![Vec::new(); level.region_count()];
    if regions.is_empty() {
      return regions;
    }
    for object in 0..object_count {
      let mut best = -1.0;
      let mut best_region = 0;
      for (region, objects) in level.iter() {
        let Some(&coverage) = objects.get(&object) else {
          continue;
        };
        if best < coverage {
          best = coverage;
          best_region = region;
        }
        if best >= 1.0 {
          break;
        }
      }
      regions[best_region].push(object);
    }
    regions
  }

  pub fn level_count(&self) -> usize {
    self.levels.len()
  }

  /// Objects assigned to `region` on `level`, in object order.
  pub fn region(&self, level: usize, region: RegionId) -> &[ObjectId] {
    &self.levels[level][region]
  }

  /// Region `object` is assigned to on `level`.
  pub fn region_of(&self, level: usize, object: ObjectId) -> Option<RegionId> {
    self.levels[level]
      .iter()
      .position(|objects| objects.binary_search(&object).is_ok())
  }
}

/// Lazily computed, cached metrics over one coverage map.
pub struct OctreeMetrics<'a, T: ObjectTable + ?Sized> {
  table: &'a T,
  coverage: &'a CoverageMap,
  ranges: FeatureRanges,
  bin_method: BinCountMethod,
  averages: Vec<Vec<OnceLock<Vec<f64>>>>,
  jaccard: Vec<OnceLock<Vec<Vec<f64>>>>,
  histograms: Vec<Vec<Vec<OnceLock<Option<Histogram>>>>>,
  assignment: OnceLock<MaxCoverageAssignment>,
}

impl<'a, T: ObjectTable + ?Sized> OctreeMetrics<'a, T> {
  pub fn new(table: &'a T, coverage: &'a CoverageMap, ranges: FeatureRanges) -> Self {
    let features = table.feature_count();

    Self {
      table,
      coverage,
      ranges,
      bin_method: BinCountMethod::default(),
      averages: coverage.levels().iter().map(|_| slots(features)).collect(),
      jaccard: slots(coverage.level_count()),
      histograms: coverage
        .levels()
        .iter()
        .map(|level| (0..level.region_count()).map(|_| slots(features)).collect())
        .collect(),
      assignment: OnceLock::new(),
    }
  }

  pub fn with_bin_method(mut self, bin_method: BinCountMethod) -> Self {
    self.bin_method = bin_method;
    self
  }

  pub fn feature_ranges(&self) -> &FeatureRanges {
    &self.ranges
  }

  pub fn coverage(&self) -> &CoverageMap {
    self.coverage
  }

  /// Coverage-weighted feature average of every region of `level`.
  ///
  /// `Σ value · coverage / n` over the `n` objects touching the region;
  /// 0 for an empty region.
  pub fn region_averages(&self, level: usize, feature: usize) -> &[f64] {
    self.averages[level][feature].get_or_init(|| {
      self
        .coverage
        .level(level)
        .iter()
        .map(|(_, objects)| {
          if objects.is_empty() {
            return 0.0;
          }
          let weighted: f64 = objects
            .iter()
            .map(|(&object, &coverage)| self.table.feature(object, feature) * coverage)
            .sum();
          weighted / objects.len() as f64
        })
        .collect()
    })
  }

  /// Smallest and largest region average, or None for a level without
  /// regions.
  pub fn min_max_region_average(&self, level: usize, feature: usize) -> Option<(f64, f64)> {
    let averages = self.region_averages(level, feature);
    let first = *averages.first()?;
    Some(
      averages
        .iter()
        .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
  }

  /// Feature values of every object touching `region`, in object order.
  pub fn region_values(&self, level: usize, region: RegionId, feature: usize) -> Vec<f64> {
    self
      .coverage
      .level(level)
      .region(region)
      .keys()
      .map(|&object| self.table.feature(object, feature))
      .collect()
  }

  /// Largest number of objects touching any one region of `level`.
  pub fn max_objects_in_region(&self, level: usize) -> usize {
    self
      .coverage
      .level(level)
      .iter()
      .map(|(_, objects)| objects.len())
      .max()
      .unwrap_or(0)
  }

  pub fn max_coverage_assignment(&self) -> &MaxCoverageAssignment {
    self
      .assignment
      .get_or_init(|| MaxCoverageAssignment::compute(self.coverage, self.table.len()))
  }

  pub fn jaccard_index(&self, level: usize, r1: RegionId, r2: RegionId) -> f64 {
    jaccard_index(self.coverage.level(level), r1, r2)
  }

  pub fn weighted_jaccard_index(&self, level: usize, r1: RegionId, r2: RegionId) -> f64 {
    weighted_jaccard_index(self.coverage.level(level), r1, r2)
  }

  pub fn jaccard_distance(&self, level: usize, r1: RegionId, r2: RegionId) -> f64 {
    jaccard_distance(self.coverage.level(level), r1, r2)
  }

  /// Jaccard index of every region pair of `level`.
  pub fn jaccard_matrix(&self, level: usize) -> &[Vec<f64>] {
    self.jaccard[level].get_or_init(|| jaccard_matrix(self.coverage.level(level)))
  }

  /// Histogram of a region's feature values over their own range, or None
  /// for an empty region.
  pub fn region_histogram(&self, level: usize, region: RegionId, feature: usize) -> Option<&Histogram> {
    self.histograms[level][region][feature]
      .get_or_init(|| {
        let values = self.region_values(level, region, feature);
        Histogram::from_values_with(&values, self.bin_method)
      })
      .as_ref()
  }

  /// Histogram of a region's feature values over the feature's global
  /// range, so regions can be compared bin by bin.
  pub fn region_histogram_in_feature_range(&self, level: usize, region: RegionId, feature: usize) -> Histogram {
    let values = self.region_values(level, region, feature);
    let (min, max) = self.ranges.range(feature);
    let bins = self.bin_method.bin_count(values.len());
    Histogram::with_range(&values, min, max, bins)
  }
}

fn slots<V>(n: usize) -> Vec<OnceLock<V>> {
  (0..n).map(|_| OnceLock::new()).collect()
}
