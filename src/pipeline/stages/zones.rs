//! Zone statistics - pickup and dropoff counts per location

use super::{PipelineStage, StageExecutor, require_columns};
use crate::rides::columns::{
    DROPOFF_COUNT, DROPOFF_LOCATION_ID, LOCATION_ID, PICKUP_COUNT, PICKUP_LOCATION_ID,
};
use anyhow::Result;
use polars::prelude::*;

/// Collapses filtered rides into one row per location id.
///
/// Pickup and dropoff counts are computed independently and full-outer-joined,
/// so a location seen on only one side keeps a null count on the other. The
/// result is sorted by `LocationId`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZoneStatsExecutor;

fn location_counts(lf: LazyFrame, key: &str, count_name: &str) -> LazyFrame {
    lf.group_by([col(key).cast(DataType::Int64)])
        .agg([len().cast(DataType::Int64).alias(count_name)])
}

impl StageExecutor for ZoneStatsExecutor {
    fn execute(&self, mut lf: LazyFrame) -> Result<LazyFrame> {
        let schema = lf.collect_schema().map_err(|e| anyhow::anyhow!(e))?;
        require_columns(
            &schema,
            self.stage(),
            &[PICKUP_LOCATION_ID, DROPOFF_LOCATION_ID],
        )?;

        let pickups = location_counts(lf.clone(), PICKUP_LOCATION_ID, PICKUP_COUNT);
        let dropoffs = location_counts(lf, DROPOFF_LOCATION_ID, DROPOFF_COUNT);

        let joined = pickups.join(
            dropoffs,
            [col(PICKUP_LOCATION_ID)],
            [col(DROPOFF_LOCATION_ID)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        );

        Ok(joined
            .select([
                col(PICKUP_LOCATION_ID).alias(LOCATION_ID),
                col(PICKUP_COUNT),
                col(DROPOFF_COUNT),
            ])
            .sort_by_exprs([col(LOCATION_ID)], SortMultipleOptions::default()))
    }

    fn stage(&self) -> PipelineStage {
        PipelineStage::ZoneStats
    }

    fn description(&self) -> String {
        format!("Count {PICKUP_COUNT}/{DROPOFF_COUNT} per {LOCATION_ID}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::{RideRow, i64_values, rides_frame};

    #[test]
    fn test_zone_counts_with_one_sided_locations() -> Result<()> {
        let mut rows = Vec::new();
        // Location 10: 5 pickups, never a dropoff
        for _ in 0..5 {
            rows.push(RideRow::between(10, 20));
        }
        // Location 20: the 5 dropoffs above plus 3 pickups
        // Location 30: 3 dropoffs, never a pickup
        for _ in 0..3 {
            rows.push(RideRow::between(20, 30));
        }

        let df = rides_frame(&rows)?;
        let zones = ZoneStatsExecutor.execute(df.lazy())?.collect()?;

        assert_eq!(
            zones
                .get_column_names()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>(),
            vec![LOCATION_ID, PICKUP_COUNT, DROPOFF_COUNT]
        );
        assert_eq!(i64_values(&zones, LOCATION_ID), vec![Some(10), Some(20), Some(30)]);
        assert_eq!(i64_values(&zones, PICKUP_COUNT), vec![Some(5), Some(3), None]);
        assert_eq!(i64_values(&zones, DROPOFF_COUNT), vec![None, Some(5), Some(3)]);
        Ok(())
    }

    #[test]
    fn test_every_location_appears_once() -> Result<()> {
        let rows: Vec<RideRow> = (0..40)
            .map(|i| RideRow::between(i % 7, (i * 3) % 11 + 5))
            .collect();
        let df = rides_frame(&rows)?;
        let zones = ZoneStatsExecutor.execute(df.clone().lazy())?.collect()?;

        let mut expected: Vec<i64> = rows
            .iter()
            .flat_map(|r| [r.pu_location, r.do_location])
            .flatten()
            .map(i64::from)
            .collect();
        expected.sort_unstable();
        expected.dedup();

        let ids: Vec<i64> = i64_values(&zones, LOCATION_ID).into_iter().flatten().collect();
        assert_eq!(ids, expected);

        let pickups: i64 = i64_values(&zones, PICKUP_COUNT).into_iter().flatten().sum();
        let dropoffs: i64 = i64_values(&zones, DROPOFF_COUNT).into_iter().flatten().sum();
        assert_eq!(pickups, 40);
        assert_eq!(dropoffs, 40);
        Ok(())
    }
}
