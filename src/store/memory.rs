//! In-memory table store.

use super::{TableName, TableStore};
use crate::error::{Result, RidesError};
use polars::prelude::DataFrame;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryTableStore {
    default_namespace: Option<String>,
    tables: RwLock<BTreeMap<TableName, DataFrame>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_namespace(mut self, namespace: Option<String>) -> Self {
        self.default_namespace = namespace;
        self
    }

    /// Seed a table, e.g. the source rides in a test.
    pub fn insert(&self, name: &str, df: DataFrame) -> Result<()> {
        let key = self.key(name)?;
        self.write_guard()?.insert(key, df);
        Ok(())
    }

    fn key(&self, name: &str) -> Result<TableName> {
        Ok(TableName::parse(name)?.resolve(self.default_namespace.as_deref()))
    }

    fn write_guard(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<TableName, DataFrame>>> {
        self.tables
            .write()
            .map_err(|_poisoned| RidesError::Other("Table store lock poisoned".to_owned()))
    }

    fn read_guard(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<TableName, DataFrame>>> {
        self.tables
            .read()
            .map_err(|_poisoned| RidesError::Other("Table store lock poisoned".to_owned()))
    }
}

impl TableStore for MemoryTableStore {
    fn read_table(&self, name: &str) -> Result<DataFrame> {
        let key = self.key(name)?;
        self.read_guard()?
            .get(&key)
            .cloned()
            .ok_or_else(|| RidesError::TableNotFound(key.to_string()))
    }

    fn overwrite_table(&self, name: &str, df: &mut DataFrame) -> Result<()> {
        let key = self.key(name)?;
        tracing::debug!("Overwriting in-memory table {key} ({} rows)", df.height());
        self.write_guard()?.insert(key, df.clone());
        Ok(())
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        let key = self.key(name)?;
        Ok(self.read_guard()?.contains_key(&key))
    }

    fn list_tables(&self) -> Result<Vec<TableName>> {
        Ok(self.read_guard()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(values: &[i64]) -> DataFrame {
        let s = Series::new("v".into(), values);
        DataFrame::new(vec![Column::from(s)]).unwrap()
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let store = MemoryTableStore::new();
        let err = store.read_table("taxi_rides").unwrap_err();
        assert!(matches!(err, RidesError::TableNotFound(ref n) if n == "taxi_rides"));
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let store = MemoryTableStore::new();
        store.overwrite_table("t", &mut frame(&[1, 2, 3])).unwrap();
        store.overwrite_table("t", &mut frame(&[9])).unwrap();

        let df = store.read_table("t").unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(store.list_tables().unwrap().len(), 1);
    }

    #[test]
    fn test_default_namespace_aliases_qualified_name() {
        let store = MemoryTableStore::new().with_default_namespace(Some("max".to_owned()));
        store.insert("taxi_rides", frame(&[1])).unwrap();

        assert!(store.table_exists("max.taxi_rides").unwrap());
        assert!(!store.table_exists("other.taxi_rides").unwrap());
    }
}
