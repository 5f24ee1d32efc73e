//! Destination capability traits
//!
//! The destination side of an import is an SQL engine abstracted to the
//! operations the pipeline actually needs: column introspection, statement
//! execution, prepared statements, and transaction control. Concrete drivers
//! (SQLite, DuckDB, PostgreSQL, ...) implement these traits outside this
//! crate.

use async_trait::async_trait;

use crate::dialect::Dialect;
use crate::value::Value;

/// Error reported by a destination, carrying the engine's error text
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct DestinationError(pub String);

impl DestinationError {
    /// Create a destination error from any displayable cause
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// Result type for destination operations
pub type DestinationResult<T> = Result<T, DestinationError>;

/// Execution flags for destination-modifying statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementFlags {
    /// Bypass the destination's internal write-locking
    ///
    /// Set on the table-creation statement when the run skips transactions,
    /// since no transaction boundary protects it otherwise. The caller opts
    /// into this consistency/performance trade.
    pub no_lock: bool,
}

impl StatementFlags {
    /// Flags with write-locking bypassed
    pub fn no_lock() -> Self {
        Self { no_lock: true }
    }
}

/// A prepared, reusable parameterized statement
///
/// The pipeline prepares the INSERT once and executes it for every row with
/// positionally bound values. Implementations must execute each call as one
/// atomic statement: a failed call leaves no partial row behind.
#[async_trait]
pub trait PreparedStatement: Send {
    /// Bind `values` positionally and execute the statement once
    async fn execute(&mut self, values: &[Value]) -> DestinationResult<()>;
}

/// Capability contract for the target SQL engine
///
/// The handle is owned exclusively by one run for its duration; no other
/// writer may use the same connection concurrently.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Dialect descriptor used for identifier quoting and placeholders
    fn dialect(&self) -> Dialect;

    /// List the existing columns of `table`, in table order
    ///
    /// An empty list means the table does not exist.
    async fn list_columns(&self, table: &str) -> DestinationResult<Vec<String>>;

    /// Execute a statement that returns no rows
    async fn execute(&self, sql: &str, flags: StatementFlags) -> DestinationResult<()>;

    /// Prepare a parameterized statement for repeated execution
    async fn prepare(&self, sql: &str) -> DestinationResult<Box<dyn PreparedStatement>>;

    /// Open a transaction
    async fn begin(&self) -> DestinationResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DestinationResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DestinationResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_error_display() {
        let err = DestinationError::new("UNIQUE constraint failed");
        assert_eq!(err.to_string(), "UNIQUE constraint failed");
    }

    #[test]
    fn test_statement_flags() {
        assert!(!StatementFlags::default().no_lock);
        assert!(StatementFlags::no_lock().no_lock);
    }
}
