use std::{any::Any, fmt::Display};

use log::info;

use crate::{
    error::{CatalogError, CatalogResult},
    metadata::{self, TableMetadata},
    BaseTable, Catalog, Identifier, LocationCatalog, TableRef, TableSource,
};

/// Tables addressed by their location on a filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HadoopTables;

impl HadoopTables {
    pub fn new() -> Self {
        Self
    }
}

impl LocationCatalog for HadoopTables {
    fn create_table(&self, location: &str, source: &TableSource) -> CatalogResult<TableRef> {
        let metadata = TableMetadata::new(location, source);
        if !metadata.create()? {
            return Err(CatalogError::table_already_exists_at(location));
        }
        info!("Created table at location {location}");
        Ok(BaseTable::new(location, metadata).arced())
    }

    fn drop_table(&self, location: &str) -> CatalogResult<()> {
        if !metadata::remove(location)? {
            return Err(CatalogError::table_not_found_at(location));
        }
        info!("Dropped table at location {location}");
        Ok(())
    }

    fn load_table(&self, location: &str) -> CatalogResult<TableRef> {
        match TableMetadata::read(location)? {
            Some(metadata) => Ok(BaseTable::new(location, metadata).arced()),
            None => Err(CatalogError::table_not_found_at(location)),
        }
    }
}

/// A catalog which keeps each table in a directory under the warehouse location.
///
/// The table `ns.tbl` lives at `<warehouse>/ns/tbl`.
#[derive(Debug, Clone)]
pub struct HadoopCatalog {
    name: String,
    warehouse: String,
}

impl HadoopCatalog {
    pub fn new(name: impl Into<String>, warehouse: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            warehouse: warehouse.into(),
        }
    }

    pub fn warehouse(&self) -> &str {
        &self.warehouse
    }

    fn table_location(&self, ident: &Identifier) -> String {
        metadata::join_location(&self.warehouse, ident.levels())
    }
}

impl Display for HadoopCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HadoopCatalog{{name={}, location={}}}",
            self.name, self.warehouse
        )
    }
}

impl Catalog for HadoopCatalog {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn create_table(&self, ident: &Identifier, source: &TableSource) -> CatalogResult<TableRef> {
        let metadata = TableMetadata::new(self.table_location(ident), source);
        if !metadata.create()? {
            return Err(CatalogError::table_already_exists(ident));
        }
        info!("Created table {ident} in catalog {}", self.name);
        Ok(BaseTable::new(ident.to_string(), metadata).arced())
    }

    fn drop_table(&self, ident: &Identifier) -> CatalogResult<()> {
        if !metadata::remove(&self.table_location(ident))? {
            return Err(CatalogError::table_not_found(ident));
        }
        info!("Dropped table {ident} from catalog {}", self.name);
        Ok(())
    }

    fn load_table(&self, ident: &Identifier) -> CatalogResult<TableRef> {
        match TableMetadata::read(&self.table_location(ident))? {
            Some(metadata) => Ok(BaseTable::new(ident.to_string(), metadata).arced()),
            None => Err(CatalogError::table_not_found(ident)),
        }
    }

    fn has_table(&self, ident: &Identifier) -> CatalogResult<bool> {
        Ok(metadata::exists(&self.table_location(ident)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    const SCHEMA: &str = r#"{"type":"struct","schema-id":0,"fields":[{"id":1,"name":"foo","required":true,"type":"string"}]}"#;
    const SPEC: &str = r#"{"spec-id":0,"fields":[{"name":"foo","transform":"identity","source-id":1,"field-id":1000}]}"#;

    fn source() -> TableSource {
        TableSource::new(SCHEMA)
            .with_partition_spec(SPEC)
            .with_properties(IndexMap::from([("dummy".to_string(), "test".to_string())]))
    }

    #[test]
    fn test_tables_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("hadoop_tables").display().to_string();
        let tables = HadoopTables::new();

        let created = tables.create_table(&location, &source()).unwrap();
        assert_eq!(created.location(), location);

        let err = tables.create_table(&location, &source()).unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists { .. }));

        let loaded = tables.load_table(&location).unwrap();
        assert_eq!(loaded.schema(), SCHEMA);
        assert_eq!(loaded.spec(), SPEC);
        assert_eq!(loaded.properties().get("dummy").map(String::as_str), Some("test"));

        tables.drop_table(&location).unwrap();
        let err = tables.load_table(&location).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Table does not exist at location: {location}")
        );
        let err = tables.drop_table(&location).unwrap_err();
        assert!(matches!(err, CatalogError::NoSuchTable { .. }));
    }

    #[test]
    fn test_catalog_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let warehouse = dir.path().join("hadoop/warehouse").display().to_string();
        let catalog = HadoopCatalog::new("default", &warehouse);
        let ident = Identifier::parse("test.table").unwrap();

        assert!(!catalog.has_table(&ident).unwrap());
        let created = catalog.create_table(&ident, &source()).unwrap();
        assert_eq!(created.location(), format!("{warehouse}/test/table"));
        assert_eq!(created.name(), "test.table");
        assert!(catalog.has_table(&ident).unwrap());

        let loaded = catalog.load_table(&ident).unwrap();
        assert_eq!(loaded.location(), created.location());
        assert_eq!(loaded.spec(), SPEC);

        catalog.drop_table(&ident).unwrap();
        assert_eq!(
            catalog.load_table(&ident).unwrap_err().to_string(),
            "Table does not exist: test.table"
        );
    }

    #[test]
    fn test_display() {
        let catalog = HadoopCatalog::new("barCatalog", "/tmp/mylocation");
        assert_eq!(
            catalog.to_string(),
            "HadoopCatalog{name=barCatalog, location=/tmp/mylocation}"
        );
    }
}
