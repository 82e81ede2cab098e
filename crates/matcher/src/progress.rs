use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SearchError;

/// Sum search reports once per this many items.
pub const SUM_PROGRESS_EVERY: usize = 100;

/// Pair and triplet scans report once per this many candidates.
pub const SCAN_PROGRESS_EVERY: u64 = 4096;

/// Receives human-readable status lines while a search runs.
///
/// Called synchronously from the search loop, so implementations must
/// return quickly and must not block. A sink may be called zero or many
/// times; nothing in the engine depends on it.
pub trait ProgressSink: Sync {
    fn report(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Sink that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _message: &str) {}
}

/// Cooperative cancellation flag shared between the caller and a run.
///
/// Strategies poll it once per outer-loop iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), SearchError> {
        if self.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }
}
