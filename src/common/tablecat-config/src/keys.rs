//! Property keys read by the catalog factory and the table dispatcher.
//!
//! Catalog properties are namespaced by catalog name, e.g. `<N>.type`. The
//! default catalog (no name) reads the un-namespaced keys instead.

/// Catalog type of the default catalog.
pub const ICEBERG_CATALOG_TYPE: &str = "iceberg.catalog.type";

/// Catalog type property, namespaced as `<N>.type`.
pub const CATALOG_TYPE: &str = "type";

/// Explicit catalog implementation, un-namespaced or `<N>.catalog-impl`.
pub const CATALOG_IMPL: &str = "catalog-impl";

/// Warehouse location, un-namespaced or `<N>.warehouse`.
pub const WAREHOUSE_LOCATION: &str = "warehouse";

/// Properties under this prefix apply to every catalog unless overridden.
pub const CATALOG_DEFAULT_PREFIX: &str = "catalog-default.";

/// Active catalog name for a call.
pub const CATALOG_NAME: &str = "catalog-name";

pub const TABLE_LOCATION: &str = "table.location";
pub const TABLE_IDENTIFIER: &str = "table.identifier";
pub const TABLE_SCHEMA: &str = "table.schema";
pub const PARTITION_SPEC: &str = "table.partition-spec";

/// Addressing keys of a [`crate::TablePropertySet`].
pub const LOCATION: &str = "location";
pub const NAME: &str = "name";

/// Catalog name selecting location-only addressing.
pub const LOCATION_BASED_TABLE: &str = "location_based_table";

/// Legacy value of [`ICEBERG_CATALOG_TYPE`] selecting location-only addressing.
pub const LOCATION_CATALOG_TYPE: &str = "location";

pub const CATALOG_TYPE_HIVE: &str = "hive";
pub const CATALOG_TYPE_HADOOP: &str = "hadoop";

/// Instance name used when no catalog name is given.
pub const DEFAULT_CATALOG_NAME: &str = "default";

/// Table property keys which control addressing and are never stored on the table.
pub const RESERVED_TABLE_KEYS: [&str; 5] =
    [LOCATION, NAME, TABLE_SCHEMA, PARTITION_SPEC, CATALOG_NAME];

/// Returns the namespaced key of a catalog property: `<catalog_name>.<key>`.
pub fn catalog_property_key(catalog_name: &str, key: &str) -> String {
    format!("{catalog_name}.{key}")
}

/// Returns true iff the table property key controls addressing.
pub fn is_reserved_table_key(key: &str) -> bool {
    RESERVED_TABLE_KEYS.contains(&key)
}
