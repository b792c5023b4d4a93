//! Background generation on the tokio blocking pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use entrain_spec::SessionParameters;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{Progress, SessionGenerator};
use crate::buffer::SessionBuffer;
use crate::error::{AudioError, AudioResult};

/// Cloneable handle that cancels a running generation.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests cancellation. The task stops at the next chunk boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// True once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A session being generated in the background.
///
/// Progress reports arrive on an internal channel; read them with
/// [`GenerationTask::next_progress`]. Once cancelled, no further progress is
/// delivered and [`GenerationTask::join`] yields [`AudioError::Cancelled`].
pub struct GenerationTask {
    handle: JoinHandle<AudioResult<SessionBuffer>>,
    progress: mpsc::UnboundedReceiver<Progress>,
    cancel: CancelHandle,
}

impl GenerationTask {
    /// Validates `params` and starts generating on the blocking pool.
    ///
    /// Must be called from within a tokio runtime. Invalid parameters fail
    /// here, before any work is scheduled.
    pub fn spawn(params: &SessionParameters, seed: u32) -> AudioResult<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| AudioError::TaskFailed {
            message: e.to_string(),
        })?;
        let generator = SessionGenerator::new(params, seed)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelHandle::default();
        let flag = cancel.clone();

        let handle = runtime.spawn_blocking(move || {
            generator.run(&flag.0, |progress| {
                if flag.is_cancelled() {
                    return;
                }
                if tx.send(progress).is_err() {
                    debug!("progress receiver dropped");
                }
            })
        });

        Ok(Self {
            handle,
            progress: rx,
            cancel,
        })
    }

    /// Returns a handle that can cancel this task from elsewhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the next progress report.
    ///
    /// Returns `None` once generation has finished (all reports drained) or
    /// the task was cancelled.
    pub async fn next_progress(&mut self) -> Option<Progress> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let progress = self.progress.recv().await?;
        if self.cancel.is_cancelled() {
            return None;
        }
        Some(progress)
    }

    /// Waits for the task and returns the finished buffer.
    pub async fn join(self) -> AudioResult<SessionBuffer> {
        let result = self.handle.await.map_err(|e| AudioError::TaskFailed {
            message: e.to_string(),
        })?;
        if self.cancel.is_cancelled() {
            return Err(AudioError::Cancelled);
        }
        result
    }
}
