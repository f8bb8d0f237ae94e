//! Pipeline configuration.
//!
//! Every field defaults to the constants the pipeline was designed around, so
//! running without a config file reproduces the standard table names and
//! quality thresholds.

use crate::error::{Result, ResultExt as _, RidesError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SOURCE_TABLE: &str = "taxi_rides";
pub const DEFAULT_CLEANED_TABLE: &str = "taxi_rides_cleaned";
pub const DEFAULT_ZONE_STATS_TABLE: &str = "taxi_rides_zonestats";

/// Domain-valid ranges applied by the quality filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Inclusive lower bound on passenger count
    pub min_passengers: i64,
    /// Inclusive upper bound on passenger count
    pub max_passengers: i64,
    /// Exclusive upper bound on trip distance (miles)
    pub max_trip_distance: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_passengers: 1,
            max_passengers: 6,
            max_trip_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source_table: String,
    pub cleaned_table: String,
    pub zone_stats_table: String,
    /// Namespace applied to unqualified table names, e.g. `max`
    pub namespace: Option<String>,
    pub quality: QualityThresholds,
    /// Row limit for profiler frequency and top-N listings
    pub top_n: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_table: DEFAULT_SOURCE_TABLE.to_owned(),
            cleaned_table: DEFAULT_CLEANED_TABLE.to_owned(),
            zone_stats_table: DEFAULT_ZONE_STATS_TABLE.to_owned(),
            namespace: None,
            quality: QualityThresholds::default(),
            top_n: 10,
        }
    }
}

impl PipelineConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        let q = &self.quality;
        if q.min_passengers > q.max_passengers {
            return Err(RidesError::Config(format!(
                "passenger range is inverted: [{}, {}]",
                q.min_passengers, q.max_passengers
            )));
        }
        if q.max_trip_distance.is_nan() || q.max_trip_distance <= 0.0 {
            return Err(RidesError::Config(format!(
                "max_trip_distance must be positive, got {}",
                q.max_trip_distance
            )));
        }
        for (field, name) in [
            ("source_table", &self.source_table),
            ("cleaned_table", &self.cleaned_table),
            ("zone_stats_table", &self.zone_stats_table),
        ] {
            if name.trim().is_empty() {
                return Err(RidesError::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}
