//! Read-only profiling of the raw ride table.
//!
//! Nothing here feeds the cleaning pipeline; the report exists for a human to
//! read before trusting the cleaned output. It covers:
//! - shape, schema and a preview of the first rows
//! - per-column null and distinct counts
//! - describe/summary statistics for numeric columns
//! - Pearson correlation for each pair of integer/long/double columns
//! - payment type frequency and the longest/most expensive trips

use crate::rides::columns::{
    DROPOFF_DATETIME, FARE_AMOUNT, PAYMENT_TYPE, PICKUP_DATETIME, TRIP_DISTANCE,
};
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub name: String,
    /// Non-null values
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (ddof = 1)
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub left: String,
    pub right: String,
    /// `None` when fewer than two complete pairs exist
    pub coefficient: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ProfileReport {
    pub row_count: usize,
    pub column_count: usize,
    pub schema: Vec<(String, String)>,
    pub preview: DataFrame,
    /// One row, one column per input column
    pub null_counts: DataFrame,
    pub distinct_counts: Vec<(String, usize)>,
    pub numeric: Vec<NumericSummary>,
    pub correlations: Vec<Correlation>,
    pub payment_type_counts: DataFrame,
    pub longest_trips: DataFrame,
    pub highest_fares: DataFrame,
}

/// Profile `df`, limiting previews and rankings to `top_n` rows.
pub fn profile_rides(df: &DataFrame, top_n: u32) -> Result<ProfileReport> {
    let (row_count, column_count) = df.shape();
    tracing::info!("Profiling {row_count} rows x {column_count} columns");

    let schema = df
        .schema()
        .iter()
        .map(|(name, dtype)| (name.to_string(), dtype.to_string()))
        .collect();

    Ok(ProfileReport {
        row_count,
        column_count,
        schema,
        preview: df.head(Some(top_n as usize)),
        null_counts: df.null_count(),
        distinct_counts: distinct_counts(df)?,
        numeric: describe_numeric(df)?,
        correlations: pairwise_correlations(df)?,
        payment_type_counts: payment_type_counts(df, top_n)?,
        longest_trips: top_by(df, TRIP_DISTANCE, &[PICKUP_DATETIME, DROPOFF_DATETIME], top_n)?,
        highest_fares: top_by(df, FARE_AMOUNT, &[PAYMENT_TYPE], top_n)?,
    })
}

/// Distinct values per column; null counts as one value.
pub fn distinct_counts(df: &DataFrame) -> Result<Vec<(String, usize)>> {
    df.get_columns()
        .iter()
        .map(|c| {
            let n = c
                .as_materialized_series()
                .n_unique()
                .with_context(|| format!("Failed to count distinct values of {}", c.name()))?;
            Ok((c.name().to_string(), n))
        })
        .collect()
}

pub fn describe_numeric(df: &DataFrame) -> Result<Vec<NumericSummary>> {
    let mut out = Vec::new();
    for c in df.get_columns() {
        if !c.dtype().is_primitive_numeric() {
            continue;
        }
        let series = c.as_materialized_series().cast(&DataType::Float64)?;
        let ca = series.f64()?;

        out.push(NumericSummary {
            name: c.name().to_string(),
            count: ca.len() - ca.null_count(),
            mean: ca.mean(),
            std_dev: ca.std(1),
            min: ca.min(),
            q1: ca.quantile(0.25, QuantileMethod::Nearest)?,
            median: ca.quantile(0.5, QuantileMethod::Nearest)?,
            q3: ca.quantile(0.75, QuantileMethod::Nearest)?,
            max: ca.max(),
        });
    }
    Ok(out)
}

fn is_correlatable(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Int32 | DataType::Int64 | DataType::Float64)
}

/// Pearson correlation for every unordered pair of integer/long/double
/// columns, over rows where both values are present.
pub fn pairwise_correlations(df: &DataFrame) -> Result<Vec<Correlation>> {
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| is_correlatable(c.dtype()))
        .map(|c| c.name().to_string())
        .collect();

    let mut out = Vec::new();
    for (i, left) in names.iter().enumerate() {
        for right in names.iter().skip(i + 1) {
            out.push(Correlation {
                left: left.clone(),
                right: right.clone(),
                coefficient: pearson(df, left, right)?,
            });
        }
    }
    Ok(out)
}

fn pearson(df: &DataFrame, left: &str, right: &str) -> Result<Option<f64>> {
    let pair = df
        .select([left, right])?
        .drop_nulls::<String>(None)?;
    if pair.height() < 2 {
        return Ok(None);
    }

    let a = pair.column(left)?.as_materialized_series().cast(&DataType::Float64)?;
    let b = pair.column(right)?.as_materialized_series().cast(&DataType::Float64)?;
    Ok(polars::prelude::cov::pearson_corr(a.f64()?, b.f64()?))
}

/// Row count per payment type, most frequent first.
pub fn payment_type_counts(df: &DataFrame, top_n: u32) -> Result<DataFrame> {
    df.clone()
        .lazy()
        .group_by([col(PAYMENT_TYPE)])
        .agg([len().alias("count")])
        .sort_by_exprs(
            [col("count"), col(PAYMENT_TYPE)],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_nulls_last(true),
        )
        .limit(top_n)
        .collect()
        .context("Failed to count payment types")
}

/// The `top_n` rows with the largest `by`, projected to `by` plus `extra`.
pub fn top_by(df: &DataFrame, by: &str, extra: &[&str], top_n: u32) -> Result<DataFrame> {
    let projection: Vec<Expr> = std::iter::once(by)
        .chain(extra.iter().copied())
        .map(col)
        .collect();

    df.clone()
        .lazy()
        .sort_by_exprs(
            [col(by)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .select(projection)
        .limit(top_n)
        .collect()
        .with_context(|| format!("Failed to rank rows by {by}"))
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "null".to_owned(), |v| format!("{v:.4}"))
}

impl ProfileReport {
    /// Numeric summary as a frame, for tabular display.
    pub fn numeric_frame(&self) -> Result<DataFrame> {
        let col_of = |name: &str, f: fn(&NumericSummary) -> Option<f64>| {
            Column::new(
                name.into(),
                self.numeric.iter().map(f).collect::<Vec<_>>(),
            )
        };
        let names: Vec<&str> = self.numeric.iter().map(|s| s.name.as_str()).collect();
        let counts: Vec<u64> = self.numeric.iter().map(|s| s.count as u64).collect();

        DataFrame::new(vec![
            Column::new("column".into(), names),
            Column::new("count".into(), counts),
            col_of("mean", |s| s.mean),
            col_of("stddev", |s| s.std_dev),
            col_of("min", |s| s.min),
            col_of("25%", |s| s.q1),
            col_of("50%", |s| s.median),
            col_of("75%", |s| s.q3),
            col_of("max", |s| s.max),
        ])
        .context("Failed to build numeric summary frame")
    }
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}, Columns: {}", self.row_count, self.column_count)?;

        writeln!(f, "\nSchema:")?;
        for (name, dtype) in &self.schema {
            writeln!(f, " |-- {name}: {dtype}")?;
        }

        writeln!(f, "\nPreview:\n{}", self.preview)?;
        writeln!(f, "\nNull counts:\n{}", self.null_counts)?;

        writeln!(f, "\nDistinct values:")?;
        for (name, n) in &self.distinct_counts {
            writeln!(f, "{name}: {n} distinct values")?;
        }

        match self.numeric_frame() {
            Ok(frame) => writeln!(f, "\nSummary:\n{frame}")?,
            Err(_) => {
                for s in &self.numeric {
                    writeln!(
                        f,
                        "{}: count={} mean={} stddev={} min={} max={}",
                        s.name,
                        s.count,
                        fmt_opt(s.mean),
                        fmt_opt(s.std_dev),
                        fmt_opt(s.min),
                        fmt_opt(s.max)
                    )?;
                }
            }
        }

        writeln!(f, "\nCorrelations:")?;
        for c in &self.correlations {
            writeln!(
                f,
                "Correlation({}, {}) = {}",
                c.left,
                c.right,
                fmt_opt(c.coefficient)
            )?;
        }

        writeln!(f, "\nPayment types:\n{}", self.payment_type_counts)?;
        writeln!(f, "\nLongest trips:\n{}", self.longest_trips)?;
        write!(f, "\nHighest fares:\n{}", self.highest_fares)
    }
}
