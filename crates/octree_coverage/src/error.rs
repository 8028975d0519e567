//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Invalid input to the MDS engine, or a cancelled run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MdsError {
  #[error("dissimilarity matrix is not square: row {row} has {len} entries, expected {expected}")]
  NotSquare { row: usize, len: usize, expected: usize },

  #[error("dissimilarity matrix needs at least 3 rows, got {0}")]
  TooSmall(usize),

  #[error("dissimilarity matrix is not symmetric at ({row}, {col}): {value} vs {mirror}")]
  Asymmetric {
    row: usize,
    col: usize,
    value: f64,
    mirror: f64,
  },

  #[error("invalid dissimilarity at ({row}, {col}): {value}")]
  InvalidEntry { row: usize, col: usize, value: f64 },

  #[error("target dimensions must be at least 1")]
  ZeroDimensions,

  #[error("initial configuration must be {rows}x{dims}")]
  InitShape { rows: usize, dims: usize },

  #[error("MDS run cancelled")]
  Cancelled,
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("at least one octree level is required")]
  NoLevels,

  #[error("octree level {level}: max_depth {depth} exceeds {max}")]
  DepthTooLarge { level: usize, depth: u8, max: u8 },

  #[error("octree level {level}: max_points_per_region must be at least 1")]
  ZeroPointsPerRegion { level: usize },

  #[error("mds: {0}")]
  Mds(String),
}
