//! Async Coverage Pipeline
//!
//! Builds every octree level and the coverage map in a single background
//! task, so the caller never observes a half-built session.
//!
//! # Flow
//!
//! ```text
//! Caller                            Async (rayon)
//! ┌─────────────────┐
//! │ start(table,    │
//! │       config)   │
//! └───────┬─────────┘
//!         │
//!         ▼
//!                                  ┌───────────────┐
//!                                  │ Octree::build │
//!                                  │ (per level)   │
//!                                  └───────┬───────┘
//!                                          ▼
//!                                  ┌───────────────┐
//!                                  │ compute_      │
//!                                  │ coverage()    │
//!                                  └───────┬───────┘
//! ┌─────────────────┐                      │
//! │ poll_results()  │◄─────────────────────┘
//! │ - whole session │
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut pipeline = AsyncCoveragePipeline::new();
//! pipeline.start(Arc::new(table), config);
//!
//! // Poll from the caller's loop
//! if let Some(session) = pipeline.poll_results() {
//!     let metrics = session.metrics();
//! }
//! ```

use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, TryRecvError};

use super::session::AnalysisSession;
use crate::config::AnalysisConfig;
use crate::objects::ObjectTable;

/// Non-blocking octree + coverage build on rayon's thread pool.
pub struct AsyncCoveragePipeline<T: ObjectTable + ?Sized> {
  /// Receiver for the pending session.
  receiver: Option<Receiver<AnalysisSession<T>>>,
}

impl<T: ObjectTable + ?Sized + 'static> AsyncCoveragePipeline<T> {
  pub fn new() -> Self {
    Self { receiver: None }
  }

  /// Check if a build is running.
  pub fn is_busy(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start building a session.
  ///
  /// Returns `true` if started, `false` if already busy.
  pub fn start(&mut self, table: Arc<T>, config: AnalysisConfig) -> bool {
    if self.is_busy() {
      return false;
    }

    let (sender, receiver) = channel::bounded(1);
    self.receiver = Some(receiver);

    rayon::spawn(move || {
      let session = AnalysisSession::build(table, &config);
      // Receiver dropped = cancelled
      let _ = sender.send(session);
    });

    true
  }

  /// Poll for the finished session (non-blocking).
  ///
  /// Returns `Some(session)` once, when the build is complete.
  pub fn poll_results(&mut self) -> Option<AnalysisSession<T>> {
    let receiver = self.receiver.as_ref()?;

    match receiver.try_recv() {
      Ok(session) => {
        self.receiver = None;
        Some(session)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        self.receiver = None;
        None
      }
    }
  }

  /// Abandon the pending build. The worker finishes and its result is dropped.
  pub fn cancel(&mut self) {
    self.receiver = None;
  }
}

impl<T: ObjectTable + ?Sized + 'static> Default for AsyncCoveragePipeline<T> {
  fn default() -> Self {
    Self::new()
  }
}
