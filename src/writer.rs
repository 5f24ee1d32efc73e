//! Transactional writer: transaction lifecycle, table creation and row
//! insertion
//!
//! The writer owns the destination handle for the run's duration. Rows are
//! inserted one at a time in source order through a single prepared statement;
//! the cancellation token is polled every [`CANCEL_POLL_INTERVAL`] rows and
//! progress is logged every [`PROGRESS_LOG_INTERVAL`] rows.

use std::time::Instant;

use crate::cancel::CancelToken;
use crate::config::ImportConfig;
use crate::destination::{Destination, StatementFlags};
use crate::error::{ImportError, ImportResult};
use crate::notify::NotificationSink;
use crate::schema::{self, ReconciledSchema};
use crate::source::{ColumnDefinition, RowSource};
use crate::stats::ImportStats;
use crate::value::Value;

/// Rows between two cancellation polls
pub const CANCEL_POLL_INTERVAL: u64 = 100;

/// Rows between two progress log lines
pub const PROGRESS_LOG_INTERVAL: u64 = 1000;

/// Writes one run's rows into the destination under a single transaction
/// (unless the run opts out)
pub struct TransactionalWriter<'a> {
    destination: &'a dyn Destination,
    config: ImportConfig,
    sink: &'a dyn NotificationSink,
    cancel: CancelToken,
    in_transaction: bool,
}

impl<'a> TransactionalWriter<'a> {
    /// Create a writer bound to one destination handle for one run
    pub fn new(
        destination: &'a dyn Destination,
        config: ImportConfig,
        sink: &'a dyn NotificationSink,
        cancel: CancelToken,
    ) -> Self {
        Self {
            destination,
            config,
            sink,
            cancel,
            in_transaction: false,
        }
    }

    /// Open the run's transaction; no-op when the run skips transactions
    ///
    /// Failure is fatal: nothing further is attempted and there is nothing to
    /// roll back.
    pub async fn begin(&mut self) -> ImportResult<()> {
        if self.config.skip_transaction {
            return Ok(());
        }
        self.destination
            .begin()
            .await
            .map_err(|e| ImportError::Begin(e.to_string()))?;
        self.in_transaction = true;
        Ok(())
    }

    /// Reconcile the schema and create the destination table when missing
    ///
    /// Checks for cancellation after reconciliation, before any row is
    /// written.
    pub async fn ensure_table(
        &mut self,
        table: &str,
        source_columns: &[ColumnDefinition],
    ) -> ImportResult<ReconciledSchema> {
        let existing = self
            .destination
            .list_columns(table)
            .await
            .map_err(|e| ImportError::Introspection(e.to_string()))?;

        let plan = schema::reconcile(
            table,
            &existing,
            source_columns,
            self.destination.dialect(),
            self.sink,
        );

        let table_created = match &plan.create_ddl {
            Some(ddl) => {
                // Without a transaction boundary there is nothing to protect
                // the DDL, so the caller-requested no-lock path applies.
                let flags = if self.config.skip_transaction {
                    StatementFlags::no_lock()
                } else {
                    StatementFlags::default()
                };
                self.destination
                    .execute(ddl, flags)
                    .await
                    .map_err(|e| ImportError::CreateTable(e.to_string()))?;
                true
            }
            None => false,
        };

        if self.cancel.is_cancelled() {
            return Err(ImportError::Interrupted);
        }

        Ok(ReconciledSchema {
            columns: plan.columns,
            table_created,
        })
    }

    /// Insert every row the source produces, in source order
    ///
    /// One parameterized INSERT is prepared once and reused for every row.
    /// Short rows are padded with NULLs, long rows truncated, so insertion
    /// never fails solely due to a row/column count mismatch.
    pub async fn insert_all(
        &mut self,
        source: &mut dyn RowSource,
        table: &str,
        schema: &ReconciledSchema,
    ) -> ImportResult<ImportStats> {
        let dialect = self.destination.dialect();
        let column_count = schema.columns.len();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            dialect.wrap_identifier(table),
            dialect.wrap_identifiers(&schema.columns).join(", "),
            dialect.placeholder_list(column_count),
        );

        let mut statement = self
            .destination
            .prepare(&insert_sql)
            .await
            .map_err(|e| ImportError::Row(e.to_string()))?;

        let mut stats = ImportStats::new();
        let mut interval_start = Instant::now();

        while let Some(mut row) = source.next_row().await {
            stats.rows_read += 1;

            // Pad missing trailing values, drop excess ones
            if row.len() < column_count {
                row.resize(column_count, Value::Null);
            } else {
                row.truncate(column_count);
            }

            match statement.execute(&row).await {
                Ok(()) => stats.rows_inserted += 1,
                Err(e) => {
                    if self.config.ignore_errors {
                        stats.rows_skipped += 1;
                        self.sink.warn(&format!(
                            "Could not import data row number {}. The row was ignored. \
                             Problem details: {}",
                            stats.rows_read, e
                        ));
                    } else {
                        return Err(ImportError::Row(e.to_string()));
                    }
                }
            }

            if stats.rows_read % CANCEL_POLL_INTERVAL == 0 && self.cancel.is_cancelled() {
                return Err(ImportError::Interrupted);
            }

            if stats.rows_read % PROGRESS_LOG_INTERVAL == 0 {
                tracing::debug!(
                    rows = stats.rows_read,
                    elapsed_ms = interval_start.elapsed().as_millis() as u64,
                    "import progress"
                );
                interval_start = Instant::now();
            }
        }

        Ok(stats)
    }

    /// Commit the run's transaction; no-op when the run skips transactions
    pub async fn commit(&mut self) -> ImportResult<()> {
        if self.config.skip_transaction {
            return Ok(());
        }
        self.destination
            .commit()
            .await
            .map_err(|e| ImportError::Commit(e.to_string()))?;
        self.in_transaction = false;
        Ok(())
    }

    /// Roll back the run's transaction, if one was begun and not committed
    ///
    /// Best effort: a rollback failure is logged, not propagated, since the
    /// run already failed.
    pub async fn rollback(&mut self) {
        if !self.in_transaction {
            return;
        }
        self.in_transaction = false;
        if let Err(e) = self.destination.rollback().await {
            tracing::warn!("Rollback after failed import did not complete: {}", e);
        }
    }
}
