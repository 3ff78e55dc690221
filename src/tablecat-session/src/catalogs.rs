use std::sync::Arc;

use common_tablecat_config::{keys, ConfigurationView, TablePropertySet};
use log::debug;
use tablecat_catalog::{
    impls::HadoopTables, CatalogError, CatalogRef, CatalogResult, Identifier, LocationCatalog,
    TableRef, TableSource,
};

use crate::CatalogFactory;

/// Where a request looks for its table.
struct TableAddress<'a> {
    location: Option<&'a str>,
    identifier: Option<&'a str>,
    catalog_name: Option<&'a str>,
}

enum Target<'a> {
    Location(&'a str),
    Catalog(CatalogRef, Identifier),
}

/// Loads, creates and drops tables addressed by location or by catalog identifier.
///
/// Every call resolves its own catalog from the configuration it is given and
/// releases it on return.
#[derive(Debug, Clone)]
pub struct Catalogs {
    factory: CatalogFactory,
    tables: Arc<dyn LocationCatalog>,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::new(CatalogFactory::default())
    }
}

impl Catalogs {
    pub fn new(factory: CatalogFactory) -> Self {
        Self {
            factory,
            tables: Arc::new(HadoopTables::new()),
        }
    }

    /// Replaces the catalog used for location-addressed tables.
    #[must_use]
    pub fn with_location_catalog(mut self, tables: Arc<dyn LocationCatalog>) -> Self {
        self.tables = tables;
        self
    }

    pub fn factory(&self) -> &CatalogFactory {
        &self.factory
    }

    /// Loads the table named by the configuration.
    pub fn load_table(&self, config: &ConfigurationView) -> CatalogResult<TableRef> {
        let address = TableAddress {
            location: config.get(keys::TABLE_LOCATION),
            identifier: config.get(keys::TABLE_IDENTIFIER),
            catalog_name: config.get(keys::CATALOG_NAME),
        };
        self.load(config, &address)
    }

    /// Loads the table named by `props`, falling back to the configuration for unset keys.
    pub fn load_table_with(
        &self,
        config: &ConfigurationView,
        props: &TablePropertySet,
    ) -> CatalogResult<TableRef> {
        let address = TableAddress {
            location: props
                .location()
                .or_else(|| config.get(keys::TABLE_LOCATION)),
            identifier: props
                .name()
                .or_else(|| config.get(keys::TABLE_IDENTIFIER)),
            catalog_name: props
                .catalog_name()
                .or_else(|| config.get(keys::CATALOG_NAME)),
        };
        self.load(config, &address)
    }

    fn load(&self, config: &ConfigurationView, address: &TableAddress<'_>) -> CatalogResult<TableRef> {
        match self.target(config, address, CatalogError::illegal_argument)? {
            Target::Location(location) => {
                debug!("Loading table at location {location}");
                self.tables.load_table(location)
            }
            Target::Catalog(catalog, ident) => {
                debug!("Loading table {ident} from catalog {}", catalog.name());
                catalog.load_table(&ident)
            }
        }
    }

    /// Creates the table described by `props`.
    ///
    /// Keys other than the addressing keys become the table's properties.
    pub fn create_table(
        &self,
        config: &ConfigurationView,
        props: &TablePropertySet,
    ) -> CatalogResult<TableRef> {
        let Some(schema) = props.get(keys::TABLE_SCHEMA) else {
            return Err(CatalogError::missing_value("Table schema not set"));
        };
        let mut source = TableSource::new(schema).with_properties(props.pass_through());
        if let Some(spec) = props.get(keys::PARTITION_SPEC) {
            source = source.with_partition_spec(spec);
        }

        let address = Self::table_address(config, props);
        match self.target(config, &address, CatalogError::missing_value)? {
            Target::Location(location) => {
                debug!("Creating table at location {location}");
                self.tables.create_table(location, &source)
            }
            Target::Catalog(catalog, ident) => {
                debug!("Creating table {ident} in catalog {}", catalog.name());
                catalog.create_table(&ident, &source)
            }
        }
    }

    /// Drops the table described by `props`.
    pub fn drop_table(
        &self,
        config: &ConfigurationView,
        props: &TablePropertySet,
    ) -> CatalogResult<()> {
        let address = Self::table_address(config, props);
        match self.target(config, &address, CatalogError::missing_value)? {
            Target::Location(location) => {
                debug!("Dropping table at location {location}");
                self.tables.drop_table(location)
            }
            Target::Catalog(catalog, ident) => {
                debug!("Dropping table {ident} from catalog {}", catalog.name());
                catalog.drop_table(&ident)
            }
        }
    }

    /// Returns the named catalog, err if the name selects location-based tables.
    pub fn catalog(
        &self,
        config: &ConfigurationView,
        catalog_name: Option<&str>,
    ) -> CatalogResult<CatalogRef> {
        self.factory
            .load_catalog(config, catalog_name)?
            .ok_or_else(|| CatalogError::illegal_argument("Catalog not set"))
    }

    /// Returns true iff the catalog named by `props`, or the default catalog, is the built-in Hive catalog.
    pub fn hive_catalog(&self, config: &ConfigurationView, props: &TablePropertySet) -> bool {
        self.factory.hive_catalog(config, props)
    }

    fn table_address<'a>(
        config: &'a ConfigurationView,
        props: &'a TablePropertySet,
    ) -> TableAddress<'a> {
        TableAddress {
            location: props.location(),
            identifier: props.name(),
            catalog_name: props
                .catalog_name()
                .or_else(|| config.get(keys::CATALOG_NAME)),
        }
    }

    /// Picks the addressing mode: a location wins, otherwise the catalog must
    /// resolve and an identifier must be given.
    fn target<'a>(
        &self,
        config: &ConfigurationView,
        address: &TableAddress<'a>,
        missing: fn(&'static str) -> CatalogError,
    ) -> CatalogResult<Target<'a>> {
        if let Some(location) = address.location {
            return Ok(Target::Location(location));
        }
        let Some(catalog) = self.factory.load_catalog(config, address.catalog_name)? else {
            return Err(missing("Table location not set"));
        };
        let Some(identifier) = address.identifier else {
            return Err(missing("Table identifier not set"));
        };
        Ok(Target::Catalog(catalog, Identifier::parse(identifier)?))
    }
}
