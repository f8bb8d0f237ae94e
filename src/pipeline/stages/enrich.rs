//! Enrich stage - trip duration, calendar parts and tip percentage

use super::{PipelineStage, StageExecutor, require_columns};
use crate::rides::columns::{
    DAY, DAY_OF_WEEK, DROPOFF_DATETIME, FARE_AMOUNT, HOUR, MONTH, PICKUP_DATETIME, TIP_AMOUNT,
    TIP_PERCENT, TRIP_DURATION_MINUTES, YEAR,
};
use anyhow::{Result, bail};
use polars::prelude::*;

/// Appends the derived columns:
/// - `tripDurationMinutes`: whole-second difference between dropoff and pickup, / 60
/// - `year`, `month`, `day`, `hour`, `dayOfWeek` ("Mon".."Sun") from the pickup time
/// - `tipPercent`: tip / fare * 100, or 0 when the fare is not positive
#[derive(Debug, Default, Clone, Copy)]
pub struct EnrichStageExecutor;

/// Seconds since the epoch, floored like an integer timestamp cast.
fn epoch_seconds(column: &str) -> Expr {
    col(column)
        .dt()
        .timestamp(TimeUnit::Milliseconds)
        .floor_div(lit(1000_i64))
}

/// Text timestamps are parsed with this layout after any ISO `T` separator
/// is replaced by a space.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Strict parse of a text timestamp column: a non-null value that does not
/// match [`TIMESTAMP_FORMAT`] fails the query instead of becoming null.
pub fn parse_timestamp_expr(column: &str) -> Expr {
    col(column)
        .str()
        .replace(lit("T"), lit(" "), true)
        .str()
        .to_datetime(
            Some(TimeUnit::Microseconds),
            None,
            StrptimeOptions {
                format: Some(TIMESTAMP_FORMAT.into()),
                strict: true,
                exact: true,
                cache: true,
            },
            lit("raise"),
        )
        .alias(column)
}

pub fn trip_duration_minutes_expr() -> Expr {
    ((epoch_seconds(DROPOFF_DATETIME) - epoch_seconds(PICKUP_DATETIME)).cast(DataType::Float64)
        / lit(60.0))
    .alias(TRIP_DURATION_MINUTES)
}

pub fn tip_percent_expr() -> Expr {
    let fare = col(FARE_AMOUNT).cast(DataType::Float64);
    let tip = col(TIP_AMOUNT).cast(DataType::Float64);
    when(fare.clone().gt(lit(0.0)))
        .then(tip / fare * lit(100.0))
        .otherwise(lit(0.0))
        .alias(TIP_PERCENT)
}

impl StageExecutor for EnrichStageExecutor {
    fn execute(&self, mut lf: LazyFrame) -> Result<LazyFrame> {
        let schema = lf.collect_schema().map_err(|e| anyhow::anyhow!(e))?;
        require_columns(
            &schema,
            self.stage(),
            &[PICKUP_DATETIME, DROPOFF_DATETIME, FARE_AMOUNT, TIP_AMOUNT],
        )?;

        // Timestamps imported from text arrive as strings.
        for name in [PICKUP_DATETIME, DROPOFF_DATETIME] {
            match schema.get(name) {
                Some(DataType::String) => {
                    tracing::debug!("Parsing {name} from text as {TIMESTAMP_FORMAT}");
                    lf = lf.with_column(parse_timestamp_expr(name));
                }
                Some(dtype) if !dtype.is_temporal() => {
                    bail!("{name} must be a datetime or text column, found {dtype}");
                }
                _ => {}
            }
        }

        let pickup = col(PICKUP_DATETIME);
        Ok(lf.with_columns([
            trip_duration_minutes_expr(),
            pickup.clone().dt().year().cast(DataType::Int32).alias(YEAR),
            pickup.clone().dt().month().cast(DataType::Int32).alias(MONTH),
            pickup.clone().dt().day().cast(DataType::Int32).alias(DAY),
            pickup.clone().dt().to_string("%a").alias(DAY_OF_WEEK),
            pickup.dt().hour().cast(DataType::Int32).alias(HOUR),
            tip_percent_expr(),
        ]))
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::Enrich
    }

    fn description(&self) -> String {
        format!("Derive {TRIP_DURATION_MINUTES}, calendar parts and {TIP_PERCENT}")
    }
}
