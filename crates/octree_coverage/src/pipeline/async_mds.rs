//! Async MDS Pipeline
//!
//! Runs SMACOF on rayon's thread pool. Unlike the coverage build, a running
//! embedding can be stopped early: `cancel()` raises the shared flag that
//! the worker checks before every majorization step.

use crossbeam_channel::{self as channel, Receiver, TryRecvError};

use crate::cancel::CancelFlag;
use crate::error::MdsError;
use crate::mds::{smacof_with_cancel, Embedding, MdsConfig};

/// Non-blocking SMACOF run.
#[derive(Default)]
pub struct AsyncMdsPipeline {
  receiver: Option<Receiver<Result<Embedding, MdsError>>>,
  cancel: CancelFlag,
}

impl AsyncMdsPipeline {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_busy(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start embedding `dissimilarities`.
  ///
  /// Returns `true` if started, `false` if already busy.
  pub fn start(&mut self, dissimilarities: Vec<Vec<f64>>, config: MdsConfig) -> bool {
    if self.is_busy() {
      return false;
    }

    let (sender, receiver) = channel::bounded(1);
    self.receiver = Some(receiver);
    self.cancel = CancelFlag::new();
    let cancel = self.cancel.clone();

    rayon::spawn(move || {
      let result = smacof_with_cancel(&dissimilarities, &config, &cancel);
      let _ = sender.send(result);
    });

    true
  }

  /// Poll for the finished embedding (non-blocking).
  pub fn poll_results(&mut self) -> Option<Result<Embedding, MdsError>> {
    let receiver = self.receiver.as_ref()?;

    match receiver.try_recv() {
      Ok(result) => {
        self.receiver = None;
        Some(result)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        self.receiver = None;
        None
      }
    }
  }

  /// Stop the running embedding and drop its result.
  pub fn cancel(&mut self) {
    self.cancel.cancel();
    self.receiver = None;
  }
}
