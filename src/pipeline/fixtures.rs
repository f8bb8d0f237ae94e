//! Ride frames for unit tests.
#![expect(clippy::unwrap_used)]

use crate::rides::columns::{
    DROPOFF_DATETIME, DROPOFF_LOCATION_ID, EHAIL_FEE, FARE_AMOUNT, PASSENGER_COUNT, PAYMENT_TYPE,
    PICKUP_DATETIME, PICKUP_LOCATION_ID, STORE_AND_FWD_FLAG, TIP_AMOUNT, TOTAL_AMOUNT,
    TRIP_DISTANCE, TRIP_TYPE,
};
use chrono::NaiveDate;
use polars::prelude::*;

/// Milliseconds since the epoch for a naive UTC wall-clock time.
pub fn ts(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid test timestamp")
        .and_utc()
        .timestamp_millis()
}

/// One source row. The default is a valid ten-minute Monday morning trip.
#[derive(Debug, Clone)]
pub struct RideRow {
    pub pickup_ms: Option<i64>,
    pub dropoff_ms: Option<i64>,
    pub pu_location: Option<i32>,
    pub do_location: Option<i32>,
    pub passenger_count: Option<i32>,
    pub trip_distance: Option<f64>,
    pub fare_amount: Option<f64>,
    pub tip_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub payment_type: Option<i32>,
    pub store_and_fwd: Option<&'static str>,
    pub trip_type: Option<i32>,
}

impl Default for RideRow {
    fn default() -> Self {
        let pickup = ts(2024, 1, 15, 8, 30, 0);
        Self {
            pickup_ms: Some(pickup),
            dropoff_ms: Some(pickup + 600_000),
            pu_location: Some(74),
            do_location: Some(75),
            passenger_count: Some(2),
            trip_distance: Some(3.2),
            fare_amount: Some(15.0),
            tip_amount: Some(3.0),
            total_amount: Some(18.0),
            payment_type: Some(1),
            store_and_fwd: Some("N"),
            trip_type: Some(1),
        }
    }
}

impl RideRow {
    /// A valid trip between two zones.
    pub fn between(pu: i32, dropoff: i32) -> Self {
        Self {
            pu_location: Some(pu),
            do_location: Some(dropoff),
            ..Self::default()
        }
    }
}

/// Build a frame with the source ride schema, including the null fee column.
pub fn rides_frame(rows: &[RideRow]) -> PolarsResult<DataFrame> {
    let datetime = DataType::Datetime(TimeUnit::Milliseconds, None);
    let pick = |f: fn(&RideRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();
    let pick_i32 = |f: fn(&RideRow) -> Option<i32>| rows.iter().map(f).collect::<Vec<_>>();

    let pickups: Vec<Option<i64>> = rows.iter().map(|r| r.pickup_ms).collect();
    let dropoffs: Vec<Option<i64>> = rows.iter().map(|r| r.dropoff_ms).collect();
    let flags: Vec<Option<&str>> = rows.iter().map(|r| r.store_and_fwd).collect();

    let columns = vec![
        Series::new(PICKUP_DATETIME.into(), pickups).cast(&datetime)?,
        Series::new(DROPOFF_DATETIME.into(), dropoffs).cast(&datetime)?,
        Series::new(STORE_AND_FWD_FLAG.into(), flags),
        Series::new(PICKUP_LOCATION_ID.into(), pick_i32(|r| r.pu_location)),
        Series::new(DROPOFF_LOCATION_ID.into(), pick_i32(|r| r.do_location)),
        Series::new(PASSENGER_COUNT.into(), pick_i32(|r| r.passenger_count)),
        Series::new(TRIP_DISTANCE.into(), pick(|r| r.trip_distance)),
        Series::new(FARE_AMOUNT.into(), pick(|r| r.fare_amount)),
        Series::new(EHAIL_FEE.into(), vec![None::<f64>; rows.len()]),
        Series::new(TIP_AMOUNT.into(), pick(|r| r.tip_amount)),
        Series::new(TOTAL_AMOUNT.into(), pick(|r| r.total_amount)),
        Series::new(PAYMENT_TYPE.into(), pick_i32(|r| r.payment_type)),
        Series::new(TRIP_TYPE.into(), pick_i32(|r| r.trip_type)),
    ];

    DataFrame::new(columns.into_iter().map(Column::from).collect())
}

pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn i64_values(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn str_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_owned))
        .collect()
}
