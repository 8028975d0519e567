//! CoverageMap - per level, per region, per object coverage fractions.

use std::collections::BTreeMap;

use crate::objects::ObjectId;
use crate::octree::RegionId;

/// Coverage of one octree level: a sparse object map per region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelCoverage {
  regions: Vec<BTreeMap<ObjectId, f64>>,
}

impl LevelCoverage {
  /// Empty coverage for a level with `region_count` regions.
  pub fn new(region_count: usize) -> Self {
    Self {
      regions: vec![BTreeMap::new(); region_count],
    }
  }

  pub fn region_count(&self) -> usize {
    self.regions.len()
  }

  /// Objects touching `region` with their fractions, in object order.
  ///
  /// # Panics
  /// If `region` is out of range.
  pub fn region(&self, region: RegionId) -> &BTreeMap<ObjectId, f64> {
    &self.regions[region]
  }

  /// Fraction of `object` inside `region` (0 when it does not touch it).
  pub fn coverage(&self, region: RegionId, object: ObjectId) -> f64 {
    self.regions[region].get(&object).copied().unwrap_or(0.0)
  }

  /// Sum of an object's fractions over all regions.
  pub fn object_total(&self, object: ObjectId) -> f64 {
    self
      .regions
      .iter()
      .filter_map(|region| region.get(&object))
      .sum()
  }

  pub fn iter(&self) -> impl Iterator<Item = (RegionId, &BTreeMap<ObjectId, f64>)> {
    self.regions.iter().enumerate()
  }

  /// Add a contribution; repeated contributions are summed.
  pub(crate) fn add(&mut self, region: RegionId, object: ObjectId, fraction: f64) {
    *self.regions[region].entry(object).or_insert(0.0) += fraction;
  }
}

/// Coverage of every level, indexed `level → region → object`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoverageMap {
  levels: Vec<LevelCoverage>,
}

impl CoverageMap {
  pub fn from_levels(levels: Vec<LevelCoverage>) -> Self {
    Self { levels }
  }

  pub fn level_count(&self) -> usize {
    self.levels.len()
  }

  /// # Panics
  /// If `level` is out of range.
  pub fn level(&self, level: usize) -> &LevelCoverage {
    &self.levels[level]
  }

  pub fn levels(&self) -> &[LevelCoverage] {
    &self.levels
  }

  /// Shorthand for `level(level).coverage(region, object)`.
  pub fn coverage(&self, level: usize, region: RegionId, object: ObjectId) -> f64 {
    self.levels[level].coverage(region, object)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_contributions_are_summed() {
    let mut level = LevelCoverage::new(3);
    level.add(1, 7, 0.25);
    level.add(1, 7, 0.5);
    level.add(2, 7, 0.25);

    assert_eq!(level.coverage(1, 7), 0.75);
    assert_eq!(level.coverage(0, 7), 0.0);
    assert_eq!(level.object_total(7), 1.0);
    assert!(level.region(0).is_empty());
  }

  #[test]
  fn test_region_objects_are_ordered() {
    let mut level = LevelCoverage::new(1);
    level.add(0, 9, 0.1);
    level.add(0, 2, 0.2);
    level.add(0, 5, 0.3);

    let objects: Vec<ObjectId> = level.region(0).keys().copied().collect();
    assert_eq!(objects, vec![2, 5, 9]);
  }

  #[test]
  fn test_map_levels() {
    let mut first = LevelCoverage::new(1);
    first.add(0, 0, 1.0);
    let map = CoverageMap::from_levels(vec![first, LevelCoverage::new(8)]);

    assert_eq!(map.level_count(), 2);
    assert_eq!(map.level(1).region_count(), 8);
    assert_eq!(map.coverage(0, 0, 0), 1.0);
  }
}
