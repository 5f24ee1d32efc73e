//! Schema reconciliation between source columns and the destination table
//!
//! Decides the effective column list used for INSERT and, when the table does
//! not exist, the CREATE TABLE statement that brings it into being. The
//! effective list is always `min(destination columns, source columns)` long
//! when the table pre-exists, and exactly the source's columns when it is
//! created fresh.

use crate::dialect::Dialect;
use crate::notify::NotificationSink;
use crate::source::ColumnDefinition;

/// Outcome of reconciling source columns against the destination table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPlan {
    /// Effective destination column names, in order, unquoted
    pub columns: Vec<String>,
    /// CREATE TABLE statement to execute first, when the table does not exist
    pub create_ddl: Option<String>,
}

/// The schema a run inserts against, fixed once insertion begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledSchema {
    /// Effective destination column names, in order, unquoted
    pub columns: Vec<String>,
    /// Whether the destination table was created by this run
    pub table_created: bool,
}

/// Reconcile the source's column definitions against the destination's
/// existing columns
///
/// `existing` is the destination table's current column list; empty means the
/// table does not exist. Column-count mismatches are reported through the
/// sink but never fail the run.
pub fn reconcile(
    table: &str,
    existing: &[String],
    source_columns: &[ColumnDefinition],
    dialect: Dialect,
    sink: &dyn NotificationSink,
) -> SchemaPlan {
    if existing.is_empty() {
        return SchemaPlan {
            columns: source_columns.iter().map(|c| c.name.clone()).collect(),
            create_ddl: Some(create_table_ddl(table, source_columns, dialect)),
        };
    }

    let columns = if existing.len() < source_columns.len() {
        sink.warn(&format!(
            "Table '{}' has less columns than there are columns in the data to be imported. \
             Excessive data columns will be ignored.",
            table
        ));
        existing.to_vec()
    } else if existing.len() > source_columns.len() {
        sink.info(&format!(
            "Table '{}' has more columns than there are columns in the data to be imported. \
             Some columns in the table will be left empty.",
            table
        ));
        existing[..source_columns.len()].to_vec()
    } else {
        existing.to_vec()
    };

    SchemaPlan {
        columns,
        create_ddl: None,
    }
}

fn create_table_ddl(table: &str, columns: &[ColumnDefinition], dialect: Dialect) -> String {
    let column_defs: Vec<String> = columns
        .iter()
        .map(|col| {
            format!("{} {}", dialect.wrap_identifier(&col.name), col.declared_type)
                .trim_end()
                .to_string()
        })
        .collect();

    format!(
        "CREATE TABLE {} ({})",
        dialect.wrap_identifier(table),
        column_defs.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        warnings: Mutex<Vec<String>>,
        infos: Mutex<Vec<String>>,
    }

    impl NotificationSink for RecordingSink {
        fn warn(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }

        fn info(&self, message: &str) {
            self.infos.lock().unwrap().push(message.to_string());
        }

        fn error(&self, _message: &str) {}
    }

    fn source_cols(names: &[&str]) -> Vec<ColumnDefinition> {
        names.iter().map(|n| ColumnDefinition::untyped(*n)).collect()
    }

    #[test]
    fn test_missing_table_builds_create_ddl() {
        let sink = RecordingSink::default();
        let cols = vec![
            ColumnDefinition::new("id", "INTEGER"),
            ColumnDefinition::new("name", "TEXT"),
            ColumnDefinition::untyped("note"),
        ];
        let plan = reconcile("people", &[], &cols, Dialect::Sqlite, &sink);

        assert_eq!(plan.columns, vec!["id", "name", "note"]);
        assert_eq!(
            plan.create_ddl.as_deref(),
            Some("CREATE TABLE people (id INTEGER, name TEXT, note)")
        );
        assert!(sink.warnings.lock().unwrap().is_empty());
        assert!(sink.infos.lock().unwrap().is_empty());
    }

    #[test]
    fn test_create_ddl_quotes_when_needed() {
        let sink = RecordingSink::default();
        let cols = vec![
            ColumnDefinition::new("order", "INTEGER"),
            ColumnDefinition::new("full name", "TEXT"),
        ];
        let plan = reconcile("my table", &[], &cols, Dialect::Sqlite, &sink);

        assert_eq!(
            plan.create_ddl.as_deref(),
            Some("CREATE TABLE \"my table\" (\"order\" INTEGER, \"full name\" TEXT)")
        );
    }

    #[test]
    fn test_destination_fewer_columns_warns() {
        let sink = RecordingSink::default();
        let existing = vec!["a".to_string(), "b".to_string()];
        let plan = reconcile(
            "t",
            &existing,
            &source_cols(&["a", "b", "c", "d"]),
            Dialect::Sqlite,
            &sink,
        );

        assert_eq!(plan.columns, existing);
        assert!(plan.create_ddl.is_none());
        let warnings = sink.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Excessive data columns will be ignored"));
    }

    #[test]
    fn test_destination_more_columns_notices() {
        let sink = RecordingSink::default();
        let existing = vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ];
        let plan = reconcile("t", &existing, &source_cols(&["x", "y"]), Dialect::Sqlite, &sink);

        assert_eq!(plan.columns, vec!["a", "b"]);
        let infos = sink.infos.lock().unwrap();
        assert_eq!(infos.len(), 1);
        assert!(infos[0].contains("left empty"));
        assert!(sink.warnings.lock().unwrap().is_empty());
    }

    #[test]
    fn test_equal_columns_silent() {
        let sink = RecordingSink::default();
        let existing = vec!["a".to_string(), "b".to_string()];
        let plan = reconcile("t", &existing, &source_cols(&["x", "y"]), Dialect::Sqlite, &sink);

        assert_eq!(plan.columns, existing);
        assert!(sink.warnings.lock().unwrap().is_empty());
        assert!(sink.infos.lock().unwrap().is_empty());
    }
}
