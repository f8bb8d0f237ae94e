//! Pipeline execution engine.
//!
//! Runs the ride stages in order against a [`TableStore`] and produces a
//! [`RunReport`]. Row-level stages build one lazy plan that is collected once;
//! zone statistics are computed from the collected, filtered rides.

use super::io::{load_rides, persist_outputs};
use super::stages::{
    CleanStageExecutor, EnrichStageExecutor, PipelineStage, QualityFilterExecutor, StageExecutor,
    ZoneStatsExecutor,
};
use crate::config::PipelineConfig;
use crate::store::TableStore;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::time::{Duration, Instant};

/// Report generated after pipeline execution
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rows read from the source table
    pub rows_loaded: usize,

    /// Columns read from the source table
    pub columns_before: usize,

    /// Rows that passed the quality filter and were written
    pub rows_after: usize,

    /// Columns in the cleaned table
    pub columns_after: usize,

    /// Distinct locations in the zone statistics table
    pub zone_rows: usize,

    /// Time taken for execution
    pub duration: Duration,
}

impl RunReport {
    /// Rows removed by the quality filter
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_after)
    }

    /// Create a summary message
    pub fn summary(&self) -> String {
        format!(
            "Pipeline completed: {} rows loaded, {} kept ({} dropped), {} → {} columns, {} zones, {:.2}s",
            self.rows_loaded,
            self.rows_after,
            self.rows_dropped(),
            self.columns_before,
            self.columns_after,
            self.zone_rows,
            self.duration.as_secs_f64()
        )
    }
}

/// The two frames a run persists.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub cleaned: DataFrame,
    pub zone_stats: DataFrame,
}

/// Clean, enrich and filter `raw`, then aggregate the result by location.
///
/// Pure: nothing is read from or written to a store.
pub fn transform_rides(raw: DataFrame, config: &PipelineConfig) -> Result<PipelineOutput> {
    let quality = QualityFilterExecutor::new(config.quality);
    let row_stages: [&dyn StageExecutor; 3] = [&CleanStageExecutor, &EnrichStageExecutor, &quality];

    let mut lf = raw.lazy();
    for stage in row_stages {
        tracing::debug!("{}: {}", stage.stage().as_str(), stage.description());
        lf = stage
            .execute(lf)
            .with_context(|| format!("{} stage failed", stage.stage().as_str()))?;
    }

    let cleaned = lf.collect().context("Failed to collect cleaned rides")?;
    tracing::info!(
        "{}: {} rows, {} columns",
        PipelineStage::QualityFilter.as_str(),
        cleaned.height(),
        cleaned.width()
    );

    let zones = ZoneStatsExecutor;
    tracing::debug!("{}: {}", zones.stage().as_str(), zones.description());
    let zone_stats = zones
        .execute(cleaned.clone().lazy())?
        .collect()
        .context("Failed to collect zone statistics")?;
    tracing::info!(
        "{}: {} locations",
        zones.stage().as_str(),
        zone_stats.height()
    );

    Ok(PipelineOutput {
        cleaned,
        zone_stats,
    })
}

/// Transform an already-loaded source frame and persist both outputs.
pub fn process_rides(
    store: &dyn TableStore,
    config: &PipelineConfig,
    raw: DataFrame,
) -> Result<RunReport> {
    let start = Instant::now();
    let (rows_loaded, columns_before) = raw.shape();

    let PipelineOutput {
        mut cleaned,
        mut zone_stats,
    } = transform_rides(raw, config)?;

    tracing::info!("{}: writing outputs", PipelineStage::Persist.as_str());
    let written = persist_outputs(store, config, &mut cleaned, &mut zone_stats)?;

    Ok(RunReport {
        rows_loaded,
        columns_before,
        rows_after: written.cleaned_rows,
        columns_after: cleaned.width(),
        zone_rows: written.zone_rows,
        duration: start.elapsed(),
    })
}

/// Load the configured source table, run every stage and persist the outputs.
pub fn run_pipeline(store: &dyn TableStore, config: &PipelineConfig) -> Result<RunReport> {
    let start = Instant::now();
    tracing::info!(
        "{}: reading {}",
        PipelineStage::Load.as_str(),
        config.source_table
    );
    let raw = load_rides(store, &config.source_table)?;

    let mut report = process_rides(store, config, raw)?;
    report.duration = start.elapsed();
    tracing::info!("{}", report.summary());
    Ok(report)
}
