//! Notification sink for warnings, notices and errors
//!
//! Fire-and-forget: the pipeline reports through the sink and never waits on
//! it. Non-fatal issues (column-count mismatches, ignored rows) arrive as
//! warnings or notices; every failed run produces exactly one error.

/// Receiver for human-readable pipeline notifications
pub trait NotificationSink: Send + Sync {
    /// Report a warning (run continues)
    fn warn(&self, message: &str);

    /// Report an informational notice
    fn info(&self, message: &str);

    /// Report the error that failed the run
    fn error(&self, message: &str);
}

/// Default sink forwarding notifications to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
