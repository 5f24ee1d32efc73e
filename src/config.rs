//! Import run configuration

use serde::{Deserialize, Serialize};

/// Immutable configuration snapshot for one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportConfig {
    /// Disable transaction wrapping for the run
    ///
    /// Every row's effect becomes permanent as soon as it executes, and the
    /// table-creation statement bypasses internal write-locking.
    pub skip_transaction: bool,

    /// Convert row-level insertion failures into warnings instead of aborting
    pub ignore_errors: bool,
}

impl ImportConfig {
    /// Start building a configuration
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::default()
    }
}

/// Builder for [`ImportConfig`]
#[derive(Debug, Clone, Default)]
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    /// Disable transaction wrapping
    pub fn skip_transaction(mut self, skip: bool) -> Self {
        self.config.skip_transaction = skip;
        self
    }

    /// Skip failing rows with a warning instead of aborting
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.config.ignore_errors = ignore;
        self
    }

    /// Finish building
    pub fn build(self) -> ImportConfig {
        self.config
    }
}
