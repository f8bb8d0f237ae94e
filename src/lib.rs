//! # Ride EDA - exploratory analysis and cleaning of taxi ride data
//!
//! Loads a raw ride table, profiles it, cleans and enriches it, filters out
//! implausible trips and aggregates pickups/dropoffs per location. Results are
//! written back as tables through a pluggable store.
//!
//! ## Core Modules
//!
//! - [`pipeline`]: profiler and the load → clean → enrich → filter → aggregate → persist run
//!   - [`pipeline::stages`]: the individual `LazyFrame` rewrites
//! - [`store`]: table catalog trait with in-memory and Parquet backends
//! - [`rides`]: column names and categorical code labels
//! - [`config`]: table names and quality thresholds
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup for the binary
//!
//! ## Lazy Evaluation
//!
//! Row-level stages extend a single Polars `LazyFrame` plan, which is collected
//! once before aggregation:
//!
//! ```no_run
//! use ride_eda::pipeline::stages::{CleanStageExecutor, StageExecutor};
//! use polars::prelude::*;
//!
//! # fn example(raw: DataFrame) -> anyhow::Result<()> {
//! let plan = CleanStageExecutor.execute(raw.lazy())?;
//! // Nothing executed yet - just a query plan
//! let cleaned = plan.collect()?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod rides;
pub mod store;
