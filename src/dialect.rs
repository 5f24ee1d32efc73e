//! SQL dialect descriptor and identifier quoting
//!
//! Generated DDL/DML quotes identifiers only when the identifier requires it
//! (reserved word, special characters, case sensitivity), never
//! unconditionally, to keep the generated SQL readable and compatible with
//! dialect defaults.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"));

/// Keywords that force quoting when used as an identifier.
///
/// Shared across dialects; the list errs on the side of common ANSI keywords
/// rather than enumerating every dialect-specific reserved word.
static RESERVED_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "add", "all", "alter", "and", "as", "asc", "between", "by", "case", "cast", "check",
        "collate", "column", "commit", "constraint", "create", "cross", "current", "default",
        "delete", "desc", "distinct", "drop", "else", "end", "escape", "except", "exists",
        "foreign", "from", "full", "group", "having", "in", "index", "inner", "insert",
        "intersect", "into", "is", "join", "key", "left", "like", "limit", "natural", "not",
        "null", "offset", "on", "or", "order", "outer", "primary", "references", "right",
        "rollback", "select", "set", "table", "then", "to", "transaction", "union", "unique",
        "update", "using", "values", "when", "where", "with",
    ]
    .into_iter()
    .collect()
});

/// SQL dialect used by a destination for identifier quoting and parameter
/// placeholders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// DuckDB
    DuckDb,
    /// PostgreSQL
    Postgres,
}

impl Dialect {
    /// Quote an identifier for this dialect, but only if it needs it
    ///
    /// Plain identifiers (letters, digits, underscores, not starting with a
    /// digit, not a reserved keyword) pass through untouched. Everything else
    /// is wrapped in double quotes with embedded quotes doubled.
    pub fn wrap_identifier(&self, identifier: &str) -> String {
        if self.requires_quoting(identifier) {
            format!("\"{}\"", identifier.replace('"', "\"\""))
        } else {
            identifier.to_string()
        }
    }

    /// Quote each identifier in a list, preserving order
    pub fn wrap_identifiers(&self, identifiers: &[String]) -> Vec<String> {
        identifiers.iter().map(|i| self.wrap_identifier(i)).collect()
    }

    /// Parameter placeholder for the 1-based position `index`
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Sqlite | Dialect::DuckDb => "?".to_string(),
            Dialect::Postgres => format!("${}", index),
        }
    }

    /// Comma-separated placeholder list for `count` parameters
    pub fn placeholder_list(&self, count: usize) -> String {
        (1..=count)
            .map(|i| self.placeholder(i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn requires_quoting(&self, identifier: &str) -> bool {
        identifier.is_empty()
            || !RE_PLAIN_IDENTIFIER.is_match(identifier)
            || RESERVED_KEYWORDS.contains(identifier.to_lowercase().as_str())
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Postgres => write!(f, "postgres"),
        }
    }
}
