//! Statistics from an import run

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters collected over one import run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStats {
    /// Number of rows read from the source
    pub rows_read: u64,
    /// Number of rows inserted into the destination
    pub rows_inserted: u64,
    /// Number of rows skipped because their insertion failed
    pub rows_skipped: u64,
    /// Duration of the run
    #[serde(skip)]
    pub duration: Duration,
}

impl ImportStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows inserted per second
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.rows_inserted as f64 / secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput() {
        let stats = ImportStats {
            rows_read: 1000,
            rows_inserted: 1000,
            rows_skipped: 0,
            duration: Duration::from_secs(10),
        };
        assert_eq!(stats.throughput(), 100.0);
    }

    #[test]
    fn test_throughput_zero_duration() {
        assert_eq!(ImportStats::new().throughput(), 0.0);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&ImportStats::new()).unwrap();
        assert!(json.contains("rowsInserted"));
        assert!(!json.contains("duration"));
    }
}
