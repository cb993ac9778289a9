//! Progress reporting and upload state tracking.
//!
//! `ProgressFn` is the callback the pipeline drives with 0-100 values.
//! `UploadTracker` is a small adapter over it for callers that poll state
//! instead of observing callbacks. Independent trackers never observe each
//! other; clones of one tracker share its state.

use std::sync::{Arc, Mutex, MutexGuard};

use lectern_core::models::UploadResult;

/// Callback invoked with overall progress in percent (0-100).
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Observable state of an upload run.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    /// True from `begin()` until `finish()`
    pub uploading: bool,
    /// Latest reported progress (0-100)
    pub progress: u8,
    /// Results collected so far in this run
    pub results: Vec<UploadResult>,
}

/// Shared tracker for one upload surface (e.g. one form or one CLI run).
#[derive(Clone, Default)]
pub struct UploadTracker {
    inner: Arc<Mutex<UploadState>>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UploadState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Mark the start of a run: uploading, zero progress, no results.
    pub fn begin(&self) {
        let mut state = self.lock();
        state.uploading = true;
        state.progress = 0;
        state.results.clear();
    }

    pub fn set_progress(&self, value: u8) {
        self.lock().progress = value.min(100);
    }

    pub fn push_result(&self, result: UploadResult) {
        self.lock().results.push(result);
    }

    /// Mark the end of a run, successful or not. Progress and results keep
    /// their last values for inspection.
    pub fn finish(&self) {
        self.lock().uploading = false;
    }

    /// Restore the idle state.
    pub fn reset(&self) {
        *self.lock() = UploadState::default();
    }

    pub fn snapshot(&self) -> UploadState {
        self.lock().clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.lock().uploading
    }

    pub fn progress(&self) -> u8 {
        self.lock().progress
    }

    /// Bridge for the pipeline's progress callback.
    pub fn progress_fn(&self) -> ProgressFn {
        let tracker = self.clone();
        Arc::new(move |value| tracker.set_progress(value))
    }
}
