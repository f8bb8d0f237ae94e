//! Loading rides from the store, persisting outputs, and importing files.

use crate::config::PipelineConfig;
use crate::store::TableStore;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::Path;

/// Read the full source ride table. No filtering or validation.
pub fn load_rides(store: &dyn TableStore, table: &str) -> Result<DataFrame> {
    let df = store
        .read_table(table)
        .with_context(|| format!("Failed to load source table {table}"))?;
    tracing::info!(
        "Loaded {table}: {} rows, {} columns",
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Row counts written by [`persist_outputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedTables {
    pub cleaned_rows: usize,
    pub zone_rows: usize,
}

/// Overwrite the cleaned ride table, then the zone statistics table.
///
/// The writes are independent: if the second fails the first has already
/// replaced its table.
pub fn persist_outputs(
    store: &dyn TableStore,
    config: &PipelineConfig,
    cleaned: &mut DataFrame,
    zone_stats: &mut DataFrame,
) -> Result<PersistedTables> {
    store
        .overwrite_table(&config.cleaned_table, cleaned)
        .with_context(|| format!("Failed to write {}", config.cleaned_table))?;
    tracing::info!("Wrote {} ({} rows)", config.cleaned_table, cleaned.height());

    store
        .overwrite_table(&config.zone_stats_table, zone_stats)
        .with_context(|| format!("Failed to write {}", config.zone_stats_table))?;
    tracing::info!(
        "Wrote {} ({} rows)",
        config.zone_stats_table,
        zone_stats.height()
    );

    Ok(PersistedTables {
        cleaned_rows: cleaned.height(),
        zone_rows: zone_stats.height(),
    })
}

/// Read a CSV or Parquet file so it can be seeded into the store.
pub fn read_rides_file(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .with_try_parse_dates(true)
            .finish()
            .context("Failed to scan CSV")?
            .collect()
            .context("Failed to read CSV")?,
        "parquet" => ParquetReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        _ => return Err(anyhow::anyhow!("Unsupported file extension: {ext}")),
    };

    tracing::info!(
        "Read {}: {} rows, {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Copy a file into the store under `table`, replacing any existing table.
pub fn import_file(store: &dyn TableStore, path: &Path, table: &str) -> Result<usize> {
    let mut df = read_rides_file(path)?;
    store
        .overwrite_table(table, &mut df)
        .with_context(|| format!("Failed to write {table}"))?;
    Ok(df.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RidesError;
    use crate::pipeline::fixtures::{RideRow, rides_frame};
    use crate::store::MemoryTableStore;

    #[test]
    fn test_load_missing_table_surfaces_not_found() {
        let store = MemoryTableStore::new();
        let err = load_rides(&store, "taxi_rides")
            .err()
            .expect("missing table must fail");
        assert!(matches!(
            err.downcast_ref::<RidesError>(),
            Some(RidesError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_load_returns_all_rows() -> Result<()> {
        let store = MemoryTableStore::new();
        store.insert("taxi_rides", rides_frame(&[RideRow::default(), RideRow::default()])?)?;
        let df = load_rides(&store, "taxi_rides")?;
        assert_eq!(df.height(), 2);
        Ok(())
    }

    #[test]
    fn test_persist_overwrites_both_tables() -> Result<()> {
        let store = MemoryTableStore::new();
        let config = PipelineConfig::default();

        let mut first = rides_frame(&[RideRow::default(), RideRow::default()])?;
        let mut zones = rides_frame(&[RideRow::default()])?;
        persist_outputs(&store, &config, &mut first, &mut zones)?;

        let mut second = rides_frame(&[RideRow::default()])?;
        let written = persist_outputs(&store, &config, &mut second, &mut zones)?;

        assert_eq!(written.cleaned_rows, 1);
        assert_eq!(store.read_table(&config.cleaned_table)?.height(), 1);
        assert!(store.table_exists(&config.zone_stats_table)?);
        Ok(())
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_rides_file(Path::new("rides.xlsx"))
            .err()
            .expect("xlsx is not supported");
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
