//! Table resolution and lifecycle dispatch across catalogs.
//!
//! [`Catalogs`] decides per request whether a table is addressed by location
//! or by catalog identifier, and [`CatalogFactory`] builds the catalog a
//! request names from the configuration.

mod catalogs;
mod factory;

pub use catalogs::Catalogs;
pub use factory::{
    CatalogFactory, CatalogImpl, CatalogRegistry, CatalogType, NoArgConstructor,
    WarehouseConstructor,
};
