pub mod hadoop;
pub mod hive;
pub mod memory;

pub use hadoop::{HadoopCatalog, HadoopTables};
pub use hive::HiveCatalog;
pub use memory::MemoryMetastore;
