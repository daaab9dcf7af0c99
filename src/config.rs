//! Run configuration for the mining pipeline
//!
//! Configuration is an immutable struct with validated construction: range
//! checks run before any data is touched, and a failed check is fatal for the
//! run. Values can come from a TOML file, with CLI flags layered on top by
//! the binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default minimum support fraction for itemset mining
pub const DEFAULT_MIN_SUPPORT: f64 = 0.3;

/// Default cap on the number of returned itemsets
pub const DEFAULT_RESULT_CAP: usize = 100;

/// Item-universe size above which `min_support` is forced to 0.3 to bound
/// combinatorial blow-up
pub const SUPPORT_OVERRIDE_CARDINALITY: usize = 300;

/// Configuration validation errors, raised before any data is processed
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("window_length must be positive, got {0}")]
    NonPositiveWindow(f64),

    #[error("min_support must be in (0, 1], got {0}")]
    SupportOutOfRange(f64),

    #[error("result_cap must be at least 1")]
    ZeroResultCap,

    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Dimension the rolling gap is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterDimension {
    /// Gap between consecutive events in seconds
    Time,
    /// Gap between consecutive events in kilometres
    Distance,
}

/// What to do with an event whose clustering-dimension value is absent
///
/// The original pipeline filled missing values with zero, which silently
/// glues such events onto the current session. That stays the default, but
/// dropping the record is available for callers that prefer not to mask
/// true gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Treat the missing value as delta 0: attach to the current session
    ZeroGap,
    /// Discard the record before clustering
    Drop,
}

/// Immutable per-run configuration for clustering and mining
///
/// # Example TOML
/// ```toml
/// window_length = 0.05
/// dimension = "distance"
/// min_support = 0.3
/// keep_singletons = false
/// result_cap = 100
/// missing_value = "zero_gap"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MiningConfig {
    /// Maximum accumulated gap within one session, in the unit of `dimension`
    pub window_length: f64,

    /// Whether sessions are bounded by elapsed time or elapsed distance
    pub dimension: ClusterDimension,

    /// Minimum support fraction for frequent itemsets, in (0, 1]
    #[serde(default = "default_min_support")]
    pub min_support: f64,

    /// Keep sequences containing a single event instead of dropping them
    #[serde(default)]
    pub keep_singletons: bool,

    /// Number of top-ranked itemsets to return
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,

    /// Policy for events with a missing clustering-dimension value
    #[serde(default = "default_missing_value")]
    pub missing_value: MissingValuePolicy,
}

fn default_min_support() -> f64 {
    DEFAULT_MIN_SUPPORT
}

fn default_result_cap() -> usize {
    DEFAULT_RESULT_CAP
}

fn default_missing_value() -> MissingValuePolicy {
    MissingValuePolicy::ZeroGap
}

impl MiningConfig {
    /// Build a validated configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if `window_length` is not positive or
    /// `min_support` falls outside (0, 1].
    pub fn new(window_length: f64, dimension: ClusterDimension) -> Result<Self, ConfigError> {
        let config = Self {
            window_length,
            dimension,
            min_support: DEFAULT_MIN_SUPPORT,
            keep_singletons: false,
            result_cap: DEFAULT_RESULT_CAP,
            missing_value: MissingValuePolicy::ZeroGap,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, rejecting unknown keys
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check all value ranges; called by every constructor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.window_length > 0.0) {
            return Err(ConfigError::NonPositiveWindow(self.window_length));
        }
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(ConfigError::SupportOutOfRange(self.min_support));
        }
        if self.result_cap == 0 {
            return Err(ConfigError::ZeroResultCap);
        }
        Ok(())
    }

    pub fn with_min_support(mut self, min_support: f64) -> Result<Self, ConfigError> {
        self.min_support = min_support;
        self.validate()?;
        Ok(self)
    }

    pub fn with_keep_singletons(mut self, keep: bool) -> Self {
        self.keep_singletons = keep;
        self
    }

    pub fn with_result_cap(mut self, cap: usize) -> Result<Self, ConfigError> {
        self.result_cap = cap;
        self.validate()?;
        Ok(self)
    }

    pub fn with_missing_value(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_value = policy;
        self
    }
}
