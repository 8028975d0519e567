//! Analysis configuration: octree levels, coverage, histogram and MDS knobs.
//!
//! Every table is optional in TOML; missing keys take their defaults.
//!
//! ```toml
//! [[levels]]
//! max_depth = 0
//!
//! [[levels]]
//! max_depth = 2
//! max_points_per_region = 4
//!
//! [coverage]
//! round_decimals = 4
//!
//! [histogram]
//! bin_method = "sturges"
//!
//! [mds]
//! dimensions = 3
//! init = { seeded = 7 }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::coverage::CoverageConfig;
use crate::error::ConfigError;
use crate::mds::{MdsConfig, MdsInit};
use crate::metrics::BinCountMethod;
use crate::octree::{OctreeConfig, MAX_OCTREE_DEPTH};

/// Histogram knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
  pub bin_method: BinCountMethod,
}

/// Everything a session needs besides the objects.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
  /// One octree per entry; level `i` of every result belongs to `levels[i]`.
  pub levels: Vec<OctreeConfig>,
  pub coverage: CoverageConfig,
  pub histogram: HistogramConfig,
  pub mds: MdsConfig,
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      levels: OctreeConfig::levels(3, 1),
      coverage: CoverageConfig::default(),
      histogram: HistogramConfig::default(),
      mds: MdsConfig::default(),
    }
  }
}

impl AnalysisConfig {
  /// Parse and validate a TOML document.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Read, parse and validate a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&source)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.levels.is_empty() {
      return Err(ConfigError::NoLevels);
    }
    for (level, octree) in self.levels.iter().enumerate() {
      if octree.max_depth > MAX_OCTREE_DEPTH {
        return Err(ConfigError::DepthTooLarge {
          level,
          depth: octree.max_depth,
          max: MAX_OCTREE_DEPTH,
        });
      }
      if octree.max_points_per_region == 0 {
        return Err(ConfigError::ZeroPointsPerRegion { level });
      }
    }

    let mds = &self.mds;
    if mds.dimensions == 0 {
      return Err(ConfigError::Mds("dimensions must be at least 1".into()));
    }
    if !(mds.max_error.is_finite() && mds.max_error >= 0.0) {
      return Err(ConfigError::Mds(format!(
        "max_error must be a finite non-negative number, got {}",
        mds.max_error
      )));
    }
    if let MdsInit::Explicit(rows) = &mds.init {
      if let Some(row) = rows.iter().position(|row| row.len() != mds.dimensions) {
        return Err(ConfigError::Mds(format!(
          "init row {} has {} values, expected {}",
          row,
          rows[row].len(),
          mds.dimensions
        )));
      }
    }
    Ok(())
  }
}
