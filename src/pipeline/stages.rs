//! Row-level pipeline stages.
//!
//! Each stage is a pure `LazyFrame -> LazyFrame` rewrite; nothing is executed
//! until the executor collects the final plan.

pub mod clean;
pub mod enrich;
pub mod quality;
pub mod zones;

pub use clean::CleanStageExecutor;
pub use enrich::EnrichStageExecutor;
pub use quality::QualityFilterExecutor;
pub use zones::ZoneStatsExecutor;

use anyhow::{Result, bail};
use polars::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Source table read
    Load,
    /// Column drop and categorical recoding
    Clean,
    /// Derived time and ratio columns
    Enrich,
    /// Domain-range row filter
    QualityFilter,
    /// Per-location pickup/dropoff counts
    ZoneStats,
    /// Output tables written
    Persist,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "Load",
            Self::Clean => "Clean",
            Self::Enrich => "Enrich",
            Self::QualityFilter => "QualityFilter",
            Self::ZoneStats => "ZoneStats",
            Self::Persist => "Persist",
        }
    }
}

/// A single transformation step in the ride pipeline.
pub trait StageExecutor {
    /// Extend the query plan with this stage
    fn execute(&self, lf: LazyFrame) -> Result<LazyFrame>;

    /// Get the stage this executor handles
    fn stage(&self) -> PipelineStage;

    /// Get a description of what this stage does
    fn description(&self) -> String;
}

/// Fail early with a readable message when the plan lacks a column a stage
/// reads.
pub(crate) fn require_columns(schema: &Schema, stage: PipelineStage, names: &[&str]) -> Result<()> {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !schema.contains(name))
        .collect();
    if !missing.is_empty() {
        bail!(
            "{} stage requires missing column(s): {}",
            stage.as_str(),
            missing.join(", ")
        );
    }
    Ok(())
}
