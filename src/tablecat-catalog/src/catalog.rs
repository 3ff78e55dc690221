use std::{any::Any, sync::Arc};

use indexmap::IndexMap;

use crate::{error::CatalogResult, Identifier, TableRef, TableSource};

/// Catalog implementation reference.
pub type CatalogRef = Arc<dyn Catalog>;

/// A catalog maps table identifiers to tables.
///
/// Instances are built per request by the catalog factory and are never shared
/// between requests, so implementations hold no request state.
pub trait Catalog: Sync + Send + std::fmt::Debug {
    /// Returns the catalog name.
    fn name(&self) -> String;

    /// Creates a new table, err if it already exists.
    fn create_table(&self, ident: &Identifier, source: &TableSource) -> CatalogResult<TableRef>;

    /// Drops the table metadata and, per the catalog's policy, its data.
    fn drop_table(&self, ident: &Identifier) -> CatalogResult<()>;

    /// Returns the given table or a not-found error.
    fn load_table(&self, ident: &Identifier) -> CatalogResult<TableRef>;

    /// Returns true iff the table exists.
    fn has_table(&self, ident: &Identifier) -> CatalogResult<bool>;

    /// Returns self as Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// A catalog implementation built with a no-argument constructor and configured afterwards.
pub trait ConfigurableCatalog: Send {
    /// Configures the catalog with its name and catalog properties.
    fn initialize(
        self: Box<Self>,
        name: &str,
        properties: &IndexMap<String, String>,
    ) -> CatalogResult<CatalogRef>;
}

/// Tables addressed directly by storage location, bypassing any catalog.
pub trait LocationCatalog: Sync + Send + std::fmt::Debug {
    fn create_table(&self, location: &str, source: &TableSource) -> CatalogResult<TableRef>;

    fn drop_table(&self, location: &str) -> CatalogResult<()>;

    fn load_table(&self, location: &str) -> CatalogResult<TableRef>;
}

/// Client of a Hive-style metastore which maps `database.table` to a table location.
pub trait MetastoreClient: Sync + Send + std::fmt::Debug {
    /// Returns the location registered for the table, if any.
    fn get_table(&self, database: &str, table: &str) -> CatalogResult<Option<String>>;

    /// Registers a table, returns false if the table is already registered.
    fn create_table(&self, database: &str, table: &str, location: &str) -> CatalogResult<bool>;

    /// Unregisters a table, returning its location if it was registered.
    fn drop_table(&self, database: &str, table: &str) -> CatalogResult<Option<String>>;
}
