//! octree_coverage - multi-level octree coverage of spatial objects
//!
//! Builds several octrees over the sample points of a set of line, polyline
//! and ellipsoid objects, measures the fraction of every object that falls
//! inside every leaf region of every octree, and derives region metrics
//! from the result. A SMACOF multidimensional scaling engine projects
//! dissimilarity matrices (for example region Jaccard distances) into 1 to
//! 3 dimensions.
//!
//! # Features
//!
//! - **Octree**: deterministic point-budget subdivision with half-open
//!   region containment
//! - **Coverage**: segment/box clipping with boundary recovery, additive
//!   per-region contributions
//! - **Metrics**: coverage-weighted averages, Jaccard similarity,
//!   histograms with descriptive statistics, all cached on first use
//! - **MDS**: stress majorization with seeded or explicit initialization
//! - **Pipeline**: whole-session builds and SMACOF runs on the rayon pool
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use octree_coverage::{AnalysisConfig, AnalysisSession, CoverageObject, ObjectList};
//!
//! let mut table = ObjectList::new(vec!["length".into()]);
//! table.push(CoverageObject::line(a, b), vec![(b - a).length()]);
//!
//! let session = AnalysisSession::build(Arc::new(table), &AnalysisConfig::default());
//! let metrics = session.metrics();
//! println!("{:?}", metrics.region_averages(1, 0));
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod stats;

pub use cancel::CancelFlag;
pub use config::{AnalysisConfig, HistogramConfig};
pub use error::{ConfigError, MdsError};
pub use stats::{CoverageStats, LevelStats, SessionStats};

// Objects and the table abstraction
pub mod objects;
pub use objects::{CoverageObject, ObjectId, ObjectList, ObjectTable};

// Octree spatial subdivision
pub mod octree;
pub use octree::{DAabb3, Octree, OctreeConfig, RegionId};

// Coverage calculation
pub mod coverage;
pub use coverage::{compute_coverage, CoverageConfig, CoverageMap, CoverageOutput, LevelCoverage};

// Region metrics
pub mod metrics;
pub use metrics::{FeatureRanges, Histogram, MaxCoverageAssignment, OctreeMetrics};

// Multidimensional scaling
pub mod mds;
pub use mds::{smacof, Embedding, MdsConfig, MdsInit};

// Sessions and background jobs
pub mod pipeline;
pub use pipeline::{AnalysisSession, AsyncCoveragePipeline, AsyncMdsPipeline, SessionId};

#[cfg(test)]
pub(crate) mod test_utils;
