//! Row source capability trait
//!
//! A row source produces an ordered, finite, forward-only sequence of rows
//! plus the column definitions describing them. Concrete readers (CSV, JSON,
//! another database, ...) live outside this crate and plug in through
//! [`RowSource`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ImportConfig;
use crate::value::Row;

/// A source column: name plus the type the source declares for it
///
/// The declared type may be empty when the source has no type information
/// (e.g. CSV headers); it is only used when the destination table has to be
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Column name as emitted by the source
    pub name: String,
    /// Declared type, possibly empty
    #[serde(default)]
    pub declared_type: String,
}

impl ColumnDefinition {
    /// Create a column definition with a declared type
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// Create a column definition without type information
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: String::new(),
        }
    }
}

/// Capability contract for the external row producer
///
/// One instance serves one run: `setup` is called first, `columns` once after
/// a successful setup, `next_row` until it returns `None`, and `teardown`
/// exactly once at the end of the run on every outcome path.
#[async_trait]
pub trait RowSource: Send {
    /// Source-specific preparation (open a file, parse headers, ...)
    ///
    /// Returning `false` aborts the run before any destination side effect
    /// occurs.
    async fn setup(&mut self, config: &ImportConfig) -> bool;

    /// Ordered column definitions, called once after a successful setup
    ///
    /// An empty list is a fatal configuration error.
    fn columns(&self) -> &[ColumnDefinition];

    /// Produce the next row, or `None` at end of stream
    ///
    /// The sequence is forward-only and not restartable within a run.
    async fn next_row(&mut self) -> Option<Row>;

    /// Release source-held resources; invoked exactly once per run
    async fn teardown(&mut self);
}
