//! Histograms and descriptive statistics of feature values.
//!
//! # Binning
//!
//! ```text
//! bins  = round(1 + 3.322 · ln n)        (Sturges, at least 1)
//! width = (max - min) / bins
//! bin i = [min + i·width, min + (i+1)·width)   last bin closed at max
//! ```
//!
//! Values below `min` or above `max` are counted as underflow / overflow and
//! never land in a bin.

use serde::Deserialize;

/// Rule for choosing the number of bins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinCountMethod {
  #[default]
  Sturges,
}

impl BinCountMethod {
  /// Number of bins for `observations` values (at least 1).
  pub fn bin_count(self, observations: usize) -> usize {
    match self {
      Self::Sturges => {
        if observations == 0 {
          return 1;
        }
        let bins = (1.0 + 3.322 * (observations as f64).ln()).round();
        (bins as usize).max(1)
      }
    }
  }
}

/// Streaming mean and central moments (orders 2 to 4).
///
/// One-pass update after Terriberry; numerically stable for long streams.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MomentAccumulator {
  count: usize,
  mean: f64,
  m2: f64,
  m3: f64,
  m4: f64,
}

impl MomentAccumulator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, value: f64) {
    let n1 = self.count as f64;
    self.count += 1;
    let n = self.count as f64;

    let delta = value - self.mean;
    let delta_n = delta / n;
    let delta_n2 = delta_n * delta_n;
    let term1 = delta * delta_n * n1;

    self.mean += delta_n;
    self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2 - 4.0 * delta_n * self.m3;
    self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
    self.m2 += term1;
  }

  pub fn count(&self) -> usize {
    self.count
  }

  pub fn mean(&self) -> f64 {
    self.mean
  }

  /// Sample variance (n - 1 denominator); 0 for fewer than two values.
  pub fn sample_variance(&self) -> f64 {
    if self.count < 2 {
      return 0.0;
    }
    self.m2 / (self.count - 1) as f64
  }

  /// Moment skewness `√n · M3 / M2^1.5`; 0 without spread.
  pub fn skewness(&self) -> f64 {
    if self.m2 <= 0.0 {
      return 0.0;
    }
    (self.count as f64).sqrt() * self.m3 / self.m2.powf(1.5)
  }

  /// Excess kurtosis `n · M4 / M2² - 3`; 0 without spread.
  pub fn excess_kurtosis(&self) -> f64 {
    if self.m2 <= 0.0 {
      return 0.0;
    }
    self.count as f64 * self.m4 / (self.m2 * self.m2) - 3.0
  }
}

impl Extend<f64> for MomentAccumulator {
  fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
    for value in iter {
      self.push(value);
    }
  }
}

/// Summary statistics of a value set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DescriptiveStats {
  pub count: usize,
  pub mean: f64,
  /// Exact median (mean of the two middle values for even counts).
  pub median: f64,
  /// Sample standard deviation.
  pub std_dev: f64,
  pub skewness: f64,
  /// Excess kurtosis (0 for a normal distribution).
  pub kurtosis: f64,
  pub min: f64,
  pub max: f64,
}

impl DescriptiveStats {
  /// Statistics of `values`, or None when empty.
  pub fn from_values(values: &[f64]) -> Option<Self> {
    if values.is_empty() {
      return None;
    }

    let mut moments = MomentAccumulator::new();
    moments.extend(values.iter().copied());

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
      (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
      sorted[mid]
    };

    Some(Self {
      count: values.len(),
      mean: moments.mean(),
      median,
      std_dev: moments.sample_variance().sqrt(),
      skewness: moments.skewness(),
      kurtosis: moments.excess_kurtosis(),
      min: sorted[0],
      max: sorted[sorted.len() - 1],
    })
  }
}

/// Fixed-width histogram over `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
  pub min: f64,
  pub max: f64,
  pub bin_width: f64,
  /// Count per bin.
  pub counts: Vec<usize>,
  /// Values below `min`.
  pub underflow: usize,
  /// Values above `max`.
  pub overflow: usize,
  /// Statistics of every value, in range or not.
  pub stats: DescriptiveStats,
}

impl Histogram {
  /// Histogram over the values' own range with Sturges bins, or None when
  /// `values` is empty.
  pub fn from_values(values: &[f64]) -> Option<Self> {
    Self::from_values_with(values, BinCountMethod::default())
  }

  pub fn from_values_with(values: &[f64], method: BinCountMethod) -> Option<Self> {
    let stats = DescriptiveStats::from_values(values)?;
    let bins = method.bin_count(values.len());
    Some(Self::build(values, stats.min, stats.max, bins, stats))
  }

  /// Histogram over a fixed range (e.g. the feature's global range).
  ///
  /// # Panics
  /// Debug-asserts `min <= max` and `bins > 0`.
  pub fn with_range(values: &[f64], min: f64, max: f64, bins: usize) -> Self {
    debug_assert!(min <= max, "Histogram range must satisfy min <= max");
    debug_assert!(bins > 0, "Histogram needs at least one bin");
    let stats = DescriptiveStats::from_values(values).unwrap_or_default();
    Self::build(values, min, max, bins.max(1), stats)
  }

  fn build(values: &[f64], min: f64, max: f64, bins: usize, stats: DescriptiveStats) -> Self {
    let bin_width = (max - min) / bins as f64;
    let mut histogram = Self {
      min,
      max,
      bin_width,
      counts: vec![0; bins],
      underflow: 0,
      overflow: 0,
      stats,
    };
    for &value in values {
      match histogram.bin_of(value) {
        Ok(bin) => histogram.counts[bin] += 1,
        Err(BinMiss::Below) => histogram.underflow += 1,
        Err(BinMiss::Above) => histogram.overflow += 1,
      }
    }
    histogram
  }

  /// Bin holding `value`.
  pub fn bin_of(&self, value: f64) -> Result<usize, BinMiss> {
    if value < self.min {
      return Err(BinMiss::Below);
    }
    if value > self.max {
      return Err(BinMiss::Above);
    }
    let last = self.counts.len() - 1;
    if self.bin_width <= 0.0 {
      return Ok(last);
    }
    let bin = ((value - self.min) / self.bin_width).floor() as usize;
    Ok(bin.min(last))
  }

  pub fn bin_count(&self) -> usize {
    self.counts.len()
  }

  /// Lower and upper edge of bin `bin`.
  pub fn bin_edges(&self, bin: usize) -> (f64, f64) {
    let low = self.min + bin as f64 * self.bin_width;
    if bin + 1 == self.counts.len() {
      return (low, self.max);
    }
    (low, low + self.bin_width)
  }

  /// Values counted in bins (excludes underflow and overflow).
  pub fn total(&self) -> usize {
    self.counts.iter().sum()
  }
}

/// Why a value has no bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinMiss {
  Below,
  Above,
}

#[cfg(test)]
#[path = "histogram_test.rs"]
mod histogram_test;
