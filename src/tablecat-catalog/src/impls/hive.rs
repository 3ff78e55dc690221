use std::{any::Any, sync::Arc};

use common_tablecat_config::keys;
use indexmap::IndexMap;
use log::{info, warn};

use crate::{
    error::{CatalogError, CatalogResult},
    metadata::{self, TableMetadata},
    BaseTable, Catalog, Identifier, MetastoreClient, TableRef, TableSource,
};

/// Database of identifiers without a namespace.
const DEFAULT_DATABASE: &str = "default";

/// A catalog which registers tables in a Hive-style metastore.
///
/// Identifiers are `database.table` or a bare table name in the `default`
/// database. New tables are placed at `<warehouse>/<database>.db/<table>`.
#[derive(Debug, Clone)]
pub struct HiveCatalog {
    name: String,
    properties: IndexMap<String, String>,
    metastore: Option<Arc<dyn MetastoreClient>>,
}

impl HiveCatalog {
    pub fn new(
        name: impl Into<String>,
        properties: IndexMap<String, String>,
        metastore: Option<Arc<dyn MetastoreClient>>,
    ) -> Self {
        Self {
            name: name.into(),
            properties,
            metastore,
        }
    }

    /// Returns the catalog properties this catalog was configured with.
    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    fn client(&self) -> CatalogResult<&dyn MetastoreClient> {
        self.metastore.as_deref().ok_or_else(|| {
            CatalogError::unsupported(format!(
                "Hive catalog {} has no metastore client configured",
                self.name
            ))
        })
    }

    fn split_ident(ident: &Identifier) -> CatalogResult<(&str, &str)> {
        match ident.namespace() {
            [] => Ok((DEFAULT_DATABASE, ident.name())),
            [database] => Ok((database.as_str(), ident.name())),
            _ => Err(CatalogError::invalid_identifier(ident.to_string())),
        }
    }
}

impl Catalog for HiveCatalog {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn create_table(&self, ident: &Identifier, source: &TableSource) -> CatalogResult<TableRef> {
        let client = self.client()?;
        let (database, table) = Self::split_ident(ident)?;
        if client.get_table(database, table)?.is_some() {
            return Err(CatalogError::table_already_exists(ident));
        }
        let Some(warehouse) = self.properties.get(keys::WAREHOUSE_LOCATION) else {
            return Err(CatalogError::configuration(format!(
                "Cannot create table {ident}: warehouse location not set for catalog {}",
                self.name
            )));
        };
        let location = metadata::join_location(warehouse, [format!("{database}.db").as_str(), table]);
        let metadata = TableMetadata::new(&location, source);
        if !metadata.create()? {
            return Err(CatalogError::table_already_exists_at(&location));
        }
        match client.create_table(database, table, &location) {
            Ok(true) => {}
            registered => {
                // Another writer registered the table first, or the metastore failed.
                if let Err(err) = metadata::remove(&location) {
                    warn!("Failed to clean up metadata of table {ident} at {location}: {err}");
                }
                registered?;
                return Err(CatalogError::table_already_exists(ident));
            }
        }
        info!("Created table {ident} in catalog {}", self.name);
        Ok(BaseTable::new(ident.to_string(), metadata).arced())
    }

    fn drop_table(&self, ident: &Identifier) -> CatalogResult<()> {
        let (database, table) = Self::split_ident(ident)?;
        let Some(location) = self.client()?.drop_table(database, table)? else {
            return Err(CatalogError::table_not_found(ident));
        };
        metadata::remove(&location)?;
        info!("Dropped table {ident} from catalog {}", self.name);
        Ok(())
    }

    fn load_table(&self, ident: &Identifier) -> CatalogResult<TableRef> {
        let (database, table) = Self::split_ident(ident)?;
        let Some(location) = self.client()?.get_table(database, table)? else {
            return Err(CatalogError::table_not_found(ident));
        };
        match TableMetadata::read(&location)? {
            Some(metadata) => Ok(BaseTable::new(ident.to_string(), metadata).arced()),
            None => Err(CatalogError::table_not_found(ident)),
        }
    }

    fn has_table(&self, ident: &Identifier) -> CatalogResult<bool> {
        let Ok((database, table)) = Self::split_ident(ident) else {
            return Ok(false);
        };
        Ok(self.client()?.get_table(database, table)?.is_some())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryMetastore;

    fn catalog(warehouse: &str, metastore: &Arc<MemoryMetastore>) -> HiveCatalog {
        HiveCatalog::new(
            "hive",
            IndexMap::from([(keys::WAREHOUSE_LOCATION.to_string(), warehouse.to_string())]),
            Some(metastore.clone() as Arc<dyn MetastoreClient>),
        )
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let warehouse = dir.path().display().to_string();
        let metastore = Arc::new(MemoryMetastore::new());
        metastore.create_database("test").unwrap();
        let ident = Identifier::parse("test.table").unwrap();

        let created = catalog(&warehouse, &metastore)
            .create_table(&ident, &TableSource::new("{}"))
            .unwrap();
        assert_eq!(created.location(), format!("{warehouse}/test.db/table"));

        // a fresh instance sees the table through the shared metastore
        let other = catalog(&warehouse, &metastore);
        assert!(other.has_table(&ident).unwrap());
        assert_eq!(other.load_table(&ident).unwrap().schema(), "{}");

        let err = other
            .create_table(&ident, &TableSource::new("{}"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Table already exists: test.table");

        other.drop_table(&ident).unwrap();
        assert_eq!(
            other.load_table(&ident).unwrap_err().to_string(),
            "Table does not exist: test.table"
        );
        assert!(!metadata::exists(created.location()));
    }

    #[test]
    fn test_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let warehouse = dir.path().display().to_string();
        let metastore = Arc::new(MemoryMetastore::new());
        let ident = Identifier::parse("nodb.table").unwrap();

        let err = catalog(&warehouse, &metastore)
            .create_table(&ident, &TableSource::new("{}"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoSuchNamespace { .. }));
        assert!(!metadata::exists(&format!("{warehouse}/nodb.db/table")));
    }

    #[test]
    fn test_without_metastore() {
        let catalog = HiveCatalog::new("barCatalog", IndexMap::new(), None);
        let err = catalog.load_table(&Identifier::simple("t")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hive catalog barCatalog has no metastore client configured"
        );
    }

    #[test]
    fn test_nested_namespace_is_invalid() {
        let catalog = HiveCatalog::new("hive", IndexMap::new(), None);
        let err = catalog
            .drop_table(&Identifier::parse("a.b.c").unwrap())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIdentifier { .. }));
    }
}
