//! Session building and background jobs.
//!
//! - `session`: [`AnalysisSession`], the complete octree + coverage build
//! - `async_coverage`: builds a session on the rayon pool
//! - `async_mds`: runs SMACOF on the rayon pool, cancellable

pub mod async_coverage;
pub mod async_mds;
pub mod session;

pub use async_coverage::AsyncCoveragePipeline;
pub use async_mds::AsyncMdsPipeline;
pub use session::{AnalysisSession, SessionId};
