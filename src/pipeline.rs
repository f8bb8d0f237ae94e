//! Ride EDA pipeline: load, profile, clean, enrich, filter, aggregate, persist.
//!
//! # Overview
//!
//! A run reads the raw ride table from a [`TableStore`](crate::store::TableStore)
//! and writes two tables back:
//! - **cleaned rides**: `ehailFee` dropped, categorical codes labelled,
//!   derived time/tip columns added, rows outside quality bounds removed
//! - **zone statistics**: pickup and dropoff counts per location id
//!
//! The profiler is separate and read-only; it never changes what a run writes.
//!
//! # Example
//!
//! ```no_run
//! use ride_eda::config::PipelineConfig;
//! use ride_eda::pipeline::run_pipeline;
//! use ride_eda::store::ParquetTableStore;
//!
//! let store = ParquetTableStore::new("./warehouse")?;
//! let report = run_pipeline(&store, &PipelineConfig::default())?;
//! println!("{}", report.summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod executor;
pub mod io;
pub mod profile;
pub mod stages;

#[cfg(test)]
pub(crate) mod fixtures;

pub use executor::{PipelineOutput, RunReport, process_rides, run_pipeline, transform_rides};
pub use io::{PersistedTables, import_file, load_rides, persist_outputs, read_rides_file};
pub use profile::{Correlation, NumericSummary, ProfileReport, profile_rides};
pub use stages::{PipelineStage, StageExecutor};
