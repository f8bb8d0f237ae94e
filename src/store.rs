//! Table catalog abstraction.
//!
//! The pipeline never touches files or sessions directly; it reads and writes
//! named tables through a [`TableStore`]. Two backends exist:
//!
//! - [`MemoryTableStore`]: a map of frames, used by tests
//! - [`ParquetTableStore`]: one Parquet file per table under a warehouse dir
//!
//! Table names may carry a namespace (`max.taxi_rides`). Unqualified names
//! resolve against the store's default namespace, if one is set.

pub mod memory;
pub mod parquet;

pub use memory::MemoryTableStore;
pub use parquet::ParquetTableStore;

use crate::error::{Result, RidesError};
use polars::prelude::DataFrame;
use std::fmt;

/// A possibly namespaced table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableName {
    pub namespace: Option<String>,
    pub name: String,
}

impl TableName {
    /// Parse `name` or `namespace.name`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (namespace, name) = match raw.split_once('.') {
            Some((ns, name)) => (Some(ns), name),
            None => (None, raw),
        };

        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        };
        if !valid(name) || namespace.is_some_and(|ns| !valid(ns)) {
            return Err(RidesError::Config(format!("Invalid table name: '{raw}'")));
        }

        Ok(Self {
            namespace: namespace.map(str::to_owned),
            name: name.to_owned(),
        })
    }

    /// Fill in `default_namespace` when no namespace was given.
    #[must_use]
    pub fn resolve(self, default_namespace: Option<&str>) -> Self {
        match (self.namespace, default_namespace) {
            (None, Some(ns)) => Self {
                namespace: Some(ns.to_owned()),
                name: self.name,
            },
            (namespace, _) => Self {
                namespace,
                name: self.name,
            },
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Named-table catalog the pipeline reads from and writes to.
///
/// Writes always overwrite: the new frame fully replaces any existing table
/// of the same name. Two writes are never coordinated with each other.
pub trait TableStore: Send + Sync {
    /// Read the full contents of a table.
    ///
    /// # Errors
    ///
    /// Returns [`RidesError::TableNotFound`] if no table has that name.
    fn read_table(&self, name: &str) -> Result<DataFrame>;

    /// Replace the contents of a table, creating it if needed.
    fn overwrite_table(&self, name: &str, df: &mut DataFrame) -> Result<()>;

    fn table_exists(&self, name: &str) -> Result<bool>;

    /// Fully qualified names of all tables in the store, sorted.
    fn list_tables(&self) -> Result<Vec<TableName>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_namespaced() {
        let plain = TableName::parse("taxi_rides").unwrap();
        assert_eq!(plain.namespace, None);
        assert_eq!(plain.name, "taxi_rides");

        let qualified = TableName::parse("max.taxi_rides").unwrap();
        assert_eq!(qualified.namespace.as_deref(), Some("max"));
        assert_eq!(qualified.to_string(), "max.taxi_rides");
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("max.").is_err());
        assert!(TableName::parse("a.b.c").is_err());
        assert!(TableName::parse("../etc").is_err());
    }

    #[test]
    fn test_resolve_default_namespace() {
        let name = TableName::parse("taxi_rides").unwrap().resolve(Some("max"));
        assert_eq!(name.to_string(), "max.taxi_rides");

        let explicit = TableName::parse("other.taxi_rides")
            .unwrap()
            .resolve(Some("max"));
        assert_eq!(explicit.to_string(), "other.taxi_rides");
    }
}
