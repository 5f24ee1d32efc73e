//! Cooperative cancellation
//!
//! A run polls its token at two fixed points: once after schema
//! reconciliation and once every 100 rows during insertion. The worker never
//! blocks waiting on the flag; cancellation latency is bounded by up to 100
//! row insertions.

use std::sync::{Arc, Mutex};

/// Shared cancellation flag for one import run
///
/// Clone the token and hand one copy to the worker and one to whoever may
/// request a stop (UI action, signal handler, ...). The flag is guarded by a
/// mutex on every read and write.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<Mutex<bool>>,
}

impl CancelToken {
    /// Create a fresh, un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run
    pub fn cancel(&self) {
        let mut flag = self.cancelled.lock().unwrap_or_else(|e| e.into_inner());
        *flag = true;
    }

    /// Poll whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.lock().unwrap_or_else(|e| e.into_inner())
    }
}
