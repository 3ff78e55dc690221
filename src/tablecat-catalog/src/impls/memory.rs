use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::{
    error::{CatalogError, CatalogResult},
    MetastoreClient,
};

type DatabaseTableMap = IndexMap<String, IndexMap<String, String>>;

/// A metastore entirely stored in-memory.
///
/// Maps database -> table name -> table location. The `default` database always exists.
#[derive(Debug, Clone)]
pub struct MemoryMetastore {
    databases: Arc<RwLock<DatabaseTableMap>>,
}

impl Default for MemoryMetastore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMetastore {
    pub fn new() -> Self {
        let mut databases = IndexMap::new();

        databases.insert("default".to_string(), IndexMap::new());

        Self {
            databases: Arc::new(RwLock::new(databases)),
        }
    }

    pub fn create_database(&self, database: &str) -> CatalogResult<()> {
        let mut databases = self.databases.write().unwrap();
        if databases.contains_key(database) {
            return Err(CatalogError::AlreadyExists {
                message: format!("Namespace already exists: {database}"),
            });
        }
        databases.insert(database.to_string(), IndexMap::new());
        Ok(())
    }

    pub fn list_databases(&self) -> Vec<String> {
        self.databases.read().unwrap().keys().cloned().collect()
    }

    pub fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        self.databases
            .read()
            .unwrap()
            .get(database)
            .map(|tables| tables.keys().cloned().collect())
            .ok_or_else(|| CatalogError::namespace_not_found(database))
    }
}

impl MetastoreClient for MemoryMetastore {
    fn get_table(&self, database: &str, table: &str) -> CatalogResult<Option<String>> {
        Ok(self
            .databases
            .read()
            .unwrap()
            .get(database)
            .and_then(|tables| tables.get(table).cloned()))
    }

    fn create_table(&self, database: &str, table: &str, location: &str) -> CatalogResult<bool> {
        let mut databases = self.databases.write().unwrap();
        let Some(tables) = databases.get_mut(database) else {
            return Err(CatalogError::namespace_not_found(database));
        };
        if tables.contains_key(table) {
            return Ok(false);
        }
        tables.insert(table.to_string(), location.to_string());
        Ok(true)
    }

    fn drop_table(&self, database: &str, table: &str) -> CatalogResult<Option<String>> {
        Ok(self
            .databases
            .write()
            .unwrap()
            .get_mut(database)
            .and_then(|tables| tables.shift_remove(table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_drop() {
        let metastore = MemoryMetastore::new();
        assert!(metastore.create_table("default", "t", "/w/default.db/t").unwrap());
        assert!(!metastore.create_table("default", "t", "/elsewhere").unwrap());
        assert_eq!(
            metastore.get_table("default", "t").unwrap().as_deref(),
            Some("/w/default.db/t")
        );
        assert_eq!(metastore.list_tables("default").unwrap(), vec!["t"]);

        assert_eq!(
            metastore.drop_table("default", "t").unwrap().as_deref(),
            Some("/w/default.db/t")
        );
        assert_eq!(metastore.drop_table("default", "t").unwrap(), None);
    }

    #[test]
    fn test_databases() {
        let metastore = MemoryMetastore::new();
        assert!(metastore.create_table("db", "t", "/w").is_err());
        metastore.create_database("db").unwrap();
        assert!(metastore.create_database("db").is_err());
        assert_eq!(metastore.list_databases(), vec!["default", "db"]);
        assert!(metastore.list_tables("missing").is_err());
        assert_eq!(metastore.get_table("missing", "t").unwrap(), None);
    }
}
