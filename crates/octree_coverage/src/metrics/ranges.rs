//! Global minimum / maximum of every feature column.

use crate::objects::ObjectTable;

/// Per-feature value range over all objects of a table.
///
/// Built once per table and handed to whoever needs it; nothing is cached
/// globally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureRanges {
  ranges: Vec<(f64, f64)>,
}

impl FeatureRanges {
  /// Scan every row of `table`.
  ///
  /// An empty table yields `(0, 0)` for each feature.
  pub fn from_table<T: ObjectTable + ?Sized>(table: &T) -> Self {
    let ranges = (0..table.feature_count())
      .map(|feature| {
        let mut values = (0..table.len()).map(|row| table.feature(row, feature));
        let Some(first) = values.next() else {
          return (0.0, 0.0);
        };
        values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
      })
      .collect();
    Self { ranges }
  }

  pub fn from_ranges(ranges: Vec<(f64, f64)>) -> Self {
    Self { ranges }
  }

  pub fn feature_count(&self) -> usize {
    self.ranges.len()
  }

  /// `(min, max)` of `feature`.
  ///
  /// # Panics
  /// If `feature` is out of range.
  pub fn range(&self, feature: usize) -> (f64, f64) {
    self.ranges[feature]
  }

  pub fn min(&self, feature: usize) -> f64 {
    self.ranges[feature].0
  }

  pub fn max(&self, feature: usize) -> f64 {
    self.ranges[feature].1
  }

  /// Map `value` linearly from the feature's range onto `[new_min, new_max]`.
  ///
  /// A zero-width range maps everything to `new_min`.
  pub fn normalize(&self, feature: usize, value: f64, new_min: f64, new_max: f64) -> f64 {
    let (min, max) = self.ranges[feature];
    if max == min {
      return new_min;
    }
    (new_max - new_min) * ((value - min) / (max - min)) + new_min
  }
}
