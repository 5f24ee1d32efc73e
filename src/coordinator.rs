//! Import coordinator: sequences one import run end to end
//!
//! The coordinator walks the pipeline (source setup, schema reconciliation,
//! table creation, row insertion, commit), translates every failure into a
//! single terminal outcome, and emits lifecycle events. The source's teardown
//! runs exactly once on every outcome path.

use std::time::Instant;

use crate::cancel::CancelToken;
use crate::config::ImportConfig;
use crate::destination::Destination;
use crate::error::{ImportError, ImportResult};
use crate::notify::{NotificationSink, TracingSink};
use crate::source::{ColumnDefinition, RowSource};
use crate::stats::ImportStats;
use crate::writer::TransactionalWriter;

/// Lifecycle events emitted by the coordinator
///
/// Useful for schema-cache invalidation after a run created its destination
/// table, or for driving UI state. All methods default to no-ops.
pub trait ImportEvents: Send + Sync {
    /// The run created its destination table
    fn table_created(&self, _table: &str) {}

    /// The run reached its terminal state
    fn finished(&self, _success: bool) {}
}

/// Events implementation ignoring everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl ImportEvents for NoopEvents {}

static DEFAULT_SINK: TracingSink = TracingSink;
static DEFAULT_EVENTS: NoopEvents = NoopEvents;

/// Terminal state of an import run
#[derive(Debug)]
pub enum RunOutcome {
    /// All rows and schema changes landed (or were committed individually
    /// when the run skipped transactions)
    Success {
        /// Whether the destination table was newly created by this run
        table_created: bool,
        /// Counters collected over the run
        stats: ImportStats,
    },
    /// Nothing from this run is visible (when transactional); carries the
    /// single terminal error
    Failed(ImportError),
}

impl RunOutcome {
    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }
}

/// Drives one import run against one destination table
pub struct ImportCoordinator<'a> {
    table: String,
    config: ImportConfig,
    source: &'a mut dyn RowSource,
    destination: &'a dyn Destination,
    sink: &'a dyn NotificationSink,
    events: &'a dyn ImportEvents,
    cancel: CancelToken,
}

impl<'a> ImportCoordinator<'a> {
    /// Create a coordinator for one run
    ///
    /// Notifications default to [`TracingSink`], events to no-ops, and the
    /// cancellation token to a fresh one; override them with the `with_*`
    /// methods before calling [`run`](Self::run).
    pub fn new(
        table: impl Into<String>,
        config: ImportConfig,
        source: &'a mut dyn RowSource,
        destination: &'a dyn Destination,
    ) -> Self {
        Self {
            table: table.into(),
            config,
            source,
            destination,
            sink: &DEFAULT_SINK,
            events: &DEFAULT_EVENTS,
            cancel: CancelToken::new(),
        }
    }

    /// Replace the notification sink
    pub fn with_sink(mut self, sink: &'a dyn NotificationSink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the lifecycle events receiver
    pub fn with_events(mut self, events: &'a dyn ImportEvents) -> Self {
        self.events = events;
        self
    }

    /// Share a cancellation token with the run
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute the run to its terminal state
    pub async fn run(mut self) -> RunOutcome {
        let start = Instant::now();
        match self.execute().await {
            Ok((table_created, mut stats)) => {
                stats.duration = start.elapsed();
                if table_created {
                    self.events.table_created(&self.table);
                }
                self.source.teardown().await;
                self.events.finished(true);
                RunOutcome::Success {
                    table_created,
                    stats,
                }
            }
            Err(err) => {
                self.sink.error(&err.to_string());
                self.source.teardown().await;
                self.events.finished(false);
                RunOutcome::Failed(err)
            }
        }
    }

    async fn execute(&mut self) -> ImportResult<(bool, ImportStats)> {
        if !self.source.setup(&self.config).await {
            return Err(ImportError::SourceRejected);
        }

        let columns: Vec<ColumnDefinition> = self.source.columns().to_vec();
        if columns.is_empty() {
            return Err(ImportError::NoColumns);
        }

        let mut writer = TransactionalWriter::new(
            self.destination,
            self.config,
            self.sink,
            self.cancel.clone(),
        );

        // A begin failure leaves nothing to roll back
        writer.begin().await?;

        match self.import(&mut writer, &columns).await {
            Ok(result) => Ok(result),
            Err(err) => {
                writer.rollback().await;
                Err(err)
            }
        }
    }

    async fn import(
        &mut self,
        writer: &mut TransactionalWriter<'_>,
        columns: &[ColumnDefinition],
    ) -> ImportResult<(bool, ImportStats)> {
        let schema = writer.ensure_table(&self.table, columns).await?;
        let stats = writer
            .insert_all(&mut *self.source, &self.table, &schema)
            .await?;
        writer.commit().await?;
        Ok((schema.table_created, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_success() {
        let success = RunOutcome::Success {
            table_created: false,
            stats: ImportStats::new(),
        };
        assert!(success.is_success());
        assert!(!RunOutcome::Failed(ImportError::NoColumns).is_success());
    }
}
