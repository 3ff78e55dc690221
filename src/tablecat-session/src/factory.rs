use std::{fmt::Display, sync::Arc};

use common_tablecat_config::{keys, ConfigurationView, TablePropertySet};
use indexmap::IndexMap;
use log::{debug, warn};
use tablecat_catalog::{
    impls::{HadoopCatalog, HiveCatalog},
    CatalogError, CatalogRef, CatalogResult, ConfigurableCatalog, MetastoreClient,
};

/// The kind of catalog a configuration resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogType {
    /// Built-in metastore-backed catalog.
    Hive,
    /// Built-in warehouse-backed catalog.
    Hadoop,
    /// A registered implementation, by name.
    Custom(String),
}

impl CatalogType {
    /// Parses a well-known type keyword, ignoring case.
    pub fn from_keyword(value: &str) -> CatalogResult<Self> {
        if value.eq_ignore_ascii_case(keys::CATALOG_TYPE_HIVE) {
            Ok(Self::Hive)
        } else if value.eq_ignore_ascii_case(keys::CATALOG_TYPE_HADOOP) {
            Ok(Self::Hadoop)
        } else {
            Err(CatalogError::unsupported(format!(
                "Unknown catalog type: {value}"
            )))
        }
    }
}

impl Display for CatalogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hive => f.write_str(keys::CATALOG_TYPE_HIVE),
            Self::Hadoop => f.write_str(keys::CATALOG_TYPE_HADOOP),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Builds a catalog from its name, the configuration and its warehouse location.
pub type WarehouseConstructor =
    fn(&str, &ConfigurationView, &str) -> CatalogResult<CatalogRef>;

/// Builds an unconfigured catalog, which is then initialized with its properties.
pub type NoArgConstructor = fn() -> Box<dyn ConfigurableCatalog>;

/// The constructors a catalog implementation offers, tried in declaration order.
#[derive(Clone, Copy, Default)]
pub struct CatalogImpl {
    with_warehouse: Option<WarehouseConstructor>,
    no_arg: Option<NoArgConstructor>,
}

impl CatalogImpl {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_warehouse(mut self, constructor: WarehouseConstructor) -> Self {
        self.with_warehouse = Some(constructor);
        self
    }

    #[must_use]
    pub fn with_no_arg(mut self, constructor: NoArgConstructor) -> Self {
        self.no_arg = Some(constructor);
        self
    }

    fn construct(
        &self,
        impl_name: &str,
        name: &str,
        config: &ConfigurationView,
        properties: &IndexMap<String, String>,
    ) -> CatalogResult<CatalogRef> {
        let init_failed = |err: CatalogError| {
            CatalogError::unsupported(format!(
                "Cannot initialize Catalog implementation {impl_name}: {err}"
            ))
        };
        if let Some(constructor) = self.with_warehouse {
            let Some(warehouse) = properties.get(keys::WAREHOUSE_LOCATION) else {
                return Err(CatalogError::configuration(format!(
                    "Cannot initialize catalog {impl_name}: warehouse location not set"
                )));
            };
            return constructor(name, config, warehouse).map_err(init_failed);
        }
        if let Some(constructor) = self.no_arg {
            return constructor()
                .initialize(name, properties)
                .map_err(init_failed);
        }
        Err(CatalogError::unsupported(format!(
            "Cannot initialize Catalog implementation {impl_name}: missing constructor"
        )))
    }
}

impl std::fmt::Debug for CatalogImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogImpl")
            .field("with_warehouse", &self.with_warehouse.is_some())
            .field("no_arg", &self.no_arg.is_some())
            .finish()
    }
}

/// Catalog implementations which `catalog-impl` may name.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry(IndexMap<String, CatalogImpl>);

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an implementation under `name`, replacing any previous one.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, implementation: CatalogImpl) -> Self {
        self.0.insert(name.into(), implementation);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CatalogImpl> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// Builds the catalog a configuration names.
///
/// The factory is immutable once built. Every [`CatalogFactory::load_catalog`]
/// call constructs a new catalog, nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct CatalogFactory {
    registry: CatalogRegistry,
    /// Type of a catalog whose configuration names neither a type nor an implementation.
    default_type: CatalogType,
    metastore: Option<Arc<dyn MetastoreClient>>,
}

impl Default for CatalogFactory {
    fn default() -> Self {
        Self {
            registry: CatalogRegistry::new(),
            default_type: CatalogType::Hive,
            metastore: None,
        }
    }
}

impl CatalogFactory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_registry(mut self, registry: CatalogRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn register(mut self, name: impl Into<String>, implementation: CatalogImpl) -> Self {
        self.registry = self.registry.register(name, implementation);
        self
    }

    #[must_use]
    pub fn with_default_type(mut self, default_type: CatalogType) -> Self {
        self.default_type = default_type;
        self
    }

    /// Sets the metastore client handed to Hive catalogs.
    #[must_use]
    pub fn with_metastore(mut self, metastore: Arc<dyn MetastoreClient>) -> Self {
        self.metastore = Some(metastore);
        self
    }

    pub fn registry(&self) -> &CatalogRegistry {
        &self.registry
    }

    pub fn default_type(&self) -> &CatalogType {
        &self.default_type
    }

    /// Gathers the properties of a catalog with their namespace stripped.
    ///
    /// `catalog-default.*` entries apply first, the catalog's own entries
    /// override them. Without a name the un-namespaced keys are read.
    pub fn catalog_properties(
        config: &ConfigurationView,
        catalog_name: Option<&str>,
    ) -> IndexMap<String, String> {
        let mut properties = config.with_prefix(keys::CATALOG_DEFAULT_PREFIX);
        match catalog_name.filter(|name| !name.is_empty()) {
            Some(name) => properties.extend(config.with_prefix(&format!("{name}."))),
            None => {
                for (key, config_key) in [
                    (keys::CATALOG_TYPE, keys::ICEBERG_CATALOG_TYPE),
                    (keys::CATALOG_IMPL, keys::CATALOG_IMPL),
                    (keys::WAREHOUSE_LOCATION, keys::WAREHOUSE_LOCATION),
                ] {
                    if let Some(value) = config.get(config_key) {
                        properties.insert(key.to_string(), value.to_string());
                    }
                }
            }
        }
        properties
    }

    /// Resolves the type of the named catalog without constructing it.
    ///
    /// Returns `None` when the request is location-addressed.
    pub fn catalog_type(
        &self,
        config: &ConfigurationView,
        catalog_name: Option<&str>,
    ) -> CatalogResult<Option<CatalogType>> {
        Ok(self
            .resolve(config, catalog_name)?
            .map(|(catalog_type, _)| catalog_type))
    }

    fn resolve(
        &self,
        config: &ConfigurationView,
        catalog_name: Option<&str>,
    ) -> CatalogResult<Option<(CatalogType, IndexMap<String, String>)>> {
        let catalog_name = catalog_name.filter(|name| !name.is_empty());
        let label = catalog_name.unwrap_or(keys::DEFAULT_CATALOG_NAME);
        if catalog_name == Some(keys::LOCATION_BASED_TABLE) {
            debug!("Catalog name {label} selects location-based tables");
            return Ok(None);
        }

        let mut properties = Self::catalog_properties(config, catalog_name);
        let type_property = properties.get(keys::CATALOG_TYPE).cloned();
        if let Some(value) = type_property.as_deref().filter(|value| {
            catalog_name.is_none() && value.eq_ignore_ascii_case(keys::LOCATION_CATALOG_TYPE)
        }) {
            debug!("Catalog type {value} selects location-based tables");
            return Ok(None);
        }

        let catalog_type = if let Some(impl_name) = properties.get(keys::CATALOG_IMPL) {
            if let Some(type_property) = &type_property {
                warn!(
                    "Catalog {label} sets both type={type_property} and catalog-impl={impl_name}, using catalog-impl"
                );
            }
            CatalogType::Custom(impl_name.clone())
        } else {
            match type_property {
                Some(value) => CatalogType::from_keyword(&value)?,
                None => self.default_type.clone(),
            }
        };

        if !matches!(catalog_type, CatalogType::Custom(_)) {
            properties.insert(keys::CATALOG_TYPE.to_string(), catalog_type.to_string());
        }
        debug!("Resolved catalog {label} to type {catalog_type}");
        Ok(Some((catalog_type, properties)))
    }

    /// Builds the named catalog, or returns `None` for location-addressed requests.
    pub fn load_catalog(
        &self,
        config: &ConfigurationView,
        catalog_name: Option<&str>,
    ) -> CatalogResult<Option<CatalogRef>> {
        let Some((catalog_type, properties)) = self.resolve(config, catalog_name)? else {
            return Ok(None);
        };
        let name = catalog_name
            .filter(|name| !name.is_empty())
            .unwrap_or(keys::DEFAULT_CATALOG_NAME);

        let catalog: CatalogRef = match catalog_type {
            CatalogType::Hive => Arc::new(HiveCatalog::new(
                name,
                properties,
                self.metastore.clone(),
            )),
            CatalogType::Hadoop => {
                let Some(warehouse) = properties.get(keys::WAREHOUSE_LOCATION) else {
                    return Err(CatalogError::configuration(
                        "Cannot initialize HadoopCatalog because warehouse location is not set",
                    ));
                };
                Arc::new(HadoopCatalog::new(name, warehouse.as_str()))
            }
            CatalogType::Custom(impl_name) => {
                let Some(implementation) = self.registry.get(&impl_name) else {
                    return Err(CatalogError::unsupported(format!(
                        "Cannot initialize Catalog implementation {impl_name}: not registered"
                    )));
                };
                implementation.construct(&impl_name, name, config, &properties)?
            }
        };
        Ok(Some(catalog))
    }

    /// Returns true iff the catalog named by `props`, or the default catalog, resolves to Hive.
    pub fn hive_catalog(&self, config: &ConfigurationView, props: &TablePropertySet) -> bool {
        matches!(
            self.catalog_type(config, props.catalog_name()),
            Ok(Some(CatalogType::Hive))
        )
    }
}
