mod catalog;
pub mod error;
mod identifier;
pub mod impls;
pub mod metadata;
mod table;

pub use catalog::{Catalog, CatalogRef, ConfigurableCatalog, LocationCatalog, MetastoreClient};
pub use error::{CatalogError, CatalogResult};
pub use identifier::{Identifier, Namespace};
pub use table::{BaseTable, Table, TableRef, TableSource};
