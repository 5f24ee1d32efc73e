//! Error taxonomy for import runs
//!
//! Every failed run funnels into exactly one [`ImportError`]; the display
//! texts are the human-readable messages handed to the notification sink.

/// Terminal error of a failed import run
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    /// The source declined to start (setup returned false)
    #[error("Import source failed to prepare for reading.")]
    SourceRejected,

    /// The source produced zero columns
    #[error("No columns provided by the import source.")]
    NoColumns,

    /// Opening the transaction failed
    #[error("Could not start transaction in order to import data: {0}")]
    Begin(String),

    /// Committing the transaction failed
    #[error("Could not commit transaction for imported data: {0}")]
    Commit(String),

    /// Listing the destination table's columns failed
    #[error("Could not read columns of the destination table: {0}")]
    Introspection(String),

    /// Creating the destination table failed
    #[error("Could not create table to import to: {0}")]
    CreateTable(String),

    /// A row insertion failed and the error policy does not allow skipping
    #[error("Error while importing data: {0}")]
    Row(String),

    /// Cooperative cancellation was requested
    #[error("Error while importing data: Interrupted.")]
    Interrupted,
}

impl ImportError {
    /// Whether this failure was caused by a cancellation request
    pub fn is_interrupted(&self) -> bool {
        matches!(self, ImportError::Interrupted)
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
