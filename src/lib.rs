//! Data Import Core - Transactional bulk-data import pipeline
//!
//! Provides the machinery for loading an ordered stream of rows from a
//! pluggable source into a relational table:
//! - Capability traits for row sources and SQL destinations
//! - Schema reconciliation between source columns and the target table
//! - Transaction lifecycle with optional table creation
//! - Per-row error policy (abort or skip-and-warn)
//! - Cooperative cancellation
//!
//! The concrete source (CSV reader, JSON reader, ...) and the concrete SQL
//! engine are supplied by the caller behind the [`RowSource`] and
//! [`Destination`] traits; this crate sequences them and guarantees a single,
//! consistent terminal outcome per run.

pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod destination;
pub mod dialect;
pub mod error;
pub mod notify;
pub mod schema;
pub mod source;
pub mod stats;
pub mod value;
pub mod writer;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use config::{ImportConfig, ImportConfigBuilder};
pub use coordinator::{ImportCoordinator, ImportEvents, NoopEvents, RunOutcome};
pub use destination::{
    Destination, DestinationError, DestinationResult, PreparedStatement, StatementFlags,
};
pub use dialect::Dialect;
pub use error::{ImportError, ImportResult};
pub use notify::{NotificationSink, TracingSink};
pub use schema::{ReconciledSchema, SchemaPlan};
pub use source::{ColumnDefinition, RowSource};
pub use stats::ImportStats;
pub use value::{Row, Value};
pub use writer::TransactionalWriter;
