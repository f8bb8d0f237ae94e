//! Quality filter stage - keep only rows inside domain-valid ranges

use super::{PipelineStage, StageExecutor, require_columns};
use crate::config::QualityThresholds;
use crate::rides::columns::{
    DROPOFF_LOCATION_ID, FARE_AMOUNT, PASSENGER_COUNT, TOTAL_AMOUNT, TRIP_DISTANCE,
    TRIP_DURATION_MINUTES,
};
use anyhow::Result;
use polars::prelude::*;

/// Drops rows failing any of:
/// - passenger count within `[min_passengers, max_passengers]`
/// - fare, total and duration strictly positive
/// - trip distance in `(0, max_trip_distance)`
/// - dropoff location present
///
/// A null in any tested column fails the row. Dropped rows are not reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityFilterExecutor {
    pub thresholds: QualityThresholds,
}

impl QualityFilterExecutor {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn predicate(&self) -> Expr {
        let q = self.thresholds;
        col(PASSENGER_COUNT)
            .gt_eq(lit(q.min_passengers))
            .and(col(PASSENGER_COUNT).lt_eq(lit(q.max_passengers)))
            .and(col(FARE_AMOUNT).gt(lit(0.0)))
            .and(col(TOTAL_AMOUNT).gt(lit(0.0)))
            .and(col(TRIP_DISTANCE).gt(lit(0.0)))
            .and(col(TRIP_DISTANCE).lt(lit(q.max_trip_distance)))
            .and(col(TRIP_DURATION_MINUTES).gt(lit(0.0)))
            .and(col(DROPOFF_LOCATION_ID).is_not_null())
    }
}

impl StageExecutor for QualityFilterExecutor {
    fn execute(&self, mut lf: LazyFrame) -> Result<LazyFrame> {
        let schema = lf.collect_schema().map_err(|e| anyhow::anyhow!(e))?;
        require_columns(
            &schema,
            self.stage(),
            &[
                PASSENGER_COUNT,
                FARE_AMOUNT,
                TOTAL_AMOUNT,
                TRIP_DISTANCE,
                TRIP_DURATION_MINUTES,
                DROPOFF_LOCATION_ID,
            ],
        )?;
        Ok(lf.filter(self.predicate()))
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::QualityFilter
    }

    fn description(&self) -> String {
        let q = self.thresholds;
        format!(
            "Keep passengers in [{}, {}], positive fare/total/duration, distance in (0, {}), known dropoff",
            q.min_passengers, q.max_passengers, q.max_trip_distance
        )
    }
}
