//! Parquet warehouse: one file per table.
//!
//! Layout under the warehouse root:
//!
//! ```text
//! <root>/taxi_rides.parquet             unqualified table
//! <root>/max/taxi_rides_cleaned.parquet namespaced table
//! ```
//!
//! An overwrite writes to a `.parquet.tmp` sibling and renames it over the
//! target, so readers see either the old or the new table, never a partial one.

use super::{TableName, TableStore};
use crate::error::{Result, ResultExt as _, RidesError};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const TABLE_EXT: &str = "parquet";

#[derive(Debug, Clone)]
pub struct ParquetTableStore {
    root: PathBuf,
    default_namespace: Option<String>,
}

impl ParquetTableStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create warehouse directory {}", root.display()))?;
        Ok(Self {
            root,
            default_namespace: None,
        })
    }

    #[must_use]
    pub fn with_default_namespace(mut self, namespace: Option<String>) -> Self {
        self.default_namespace = namespace;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a table, whether or not it exists yet.
    pub fn table_path(&self, name: &str) -> Result<PathBuf> {
        let table = TableName::parse(name)?.resolve(self.default_namespace.as_deref());
        Ok(self.path_for(&table))
    }

    fn path_for(&self, table: &TableName) -> PathBuf {
        let dir = match &table.namespace {
            Some(ns) => self.root.join(ns),
            None => self.root.clone(),
        };
        dir.join(format!("{}.{TABLE_EXT}", table.name))
    }

    fn qualified(&self, name: &str) -> Result<TableName> {
        Ok(TableName::parse(name)?.resolve(self.default_namespace.as_deref()))
    }
}

impl TableStore for ParquetTableStore {
    fn read_table(&self, name: &str) -> Result<DataFrame> {
        let table = self.qualified(name)?;
        let path = self.path_for(&table);
        if !path.is_file() {
            return Err(RidesError::TableNotFound(table.to_string()));
        }

        let file = fs::File::open(&path)
            .with_context(|| format!("Failed to open table file {}", path.display()))?;
        let df = ParquetReader::new(file)
            .finish()
            .with_context(|| format!("Failed to read table {table}"))?;

        tracing::debug!("Read table {table}: {} rows from {}", df.height(), path.display());
        Ok(df)
    }

    fn overwrite_table(&self, name: &str, df: &mut DataFrame) -> Result<()> {
        let table = self.qualified(name)?;
        let path = self.path_for(&table);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension(format!("{TABLE_EXT}.tmp"));
        let written = write_parquet(df, &tmp_path).and_then(|()| {
            fs::rename(&tmp_path, &path)
                .with_context(|| format!("Failed to replace table file {}", path.display()))
        });

        if let Err(e) = written {
            if tmp_path.exists()
                && let Err(cleanup) = fs::remove_file(&tmp_path)
            {
                tracing::warn!(
                    "Failed to remove temporary file {}: {cleanup}",
                    tmp_path.display()
                );
            }
            return Err(e);
        }

        tracing::debug!("Overwrote table {table} ({} rows)", df.height());
        Ok(())
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        Ok(self.table_path(name)?.is_file())
    }

    fn list_tables(&self) -> Result<Vec<TableName>> {
        let mut tables = Vec::new();
        for entry in fs::read_dir(&self.root).context("Failed to list warehouse")? {
            let path = entry?.path();
            if path.is_dir() {
                let namespace = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_owned);
                for inner in fs::read_dir(&path)? {
                    if let Some(name) = table_stem(&inner?.path()) {
                        tables.push(TableName {
                            namespace: namespace.clone(),
                            name,
                        });
                    }
                }
            } else if let Some(name) = table_stem(&path) {
                tables.push(TableName {
                    namespace: None,
                    name,
                });
            }
        }
        tables.sort();
        Ok(tables)
    }
}

fn table_stem(path: &Path) -> Option<String> {
    let is_table = path.is_file()
        && path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext == TABLE_EXT);
    if !is_table {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
}

fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(df)
        .with_context(|| format!("Failed to write Parquet file {}", path.display()))?;
    Ok(())
}
