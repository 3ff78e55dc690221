use std::sync::Arc;

use indexmap::IndexMap;

use crate::metadata::TableMetadata;

/// Table implementation reference.
pub type TableRef = Arc<dyn Table>;

/// What a new table is created from: opaque serialized schema and partition spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub schema: String,
    /// `None` for an unpartitioned table.
    pub partition_spec: Option<String>,
    pub properties: IndexMap<String, String>,
}

impl TableSource {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            partition_spec: None,
            properties: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_partition_spec(mut self, spec: impl Into<String>) -> Self {
        self.partition_spec = Some(spec.into());
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: IndexMap<String, String>) -> Self {
        self.properties = properties;
        self
    }
}

pub trait Table: Sync + Send + std::fmt::Debug {
    /// Returns the table name as known to its catalog, or its location.
    fn name(&self) -> String;

    fn location(&self) -> &str;

    /// Returns the serialized schema.
    fn schema(&self) -> &str;

    /// Returns the serialized partition spec.
    fn spec(&self) -> &str;

    fn properties(&self) -> &IndexMap<String, String>;
}

/// A table backed by its stored metadata.
#[derive(Debug, Clone)]
pub struct BaseTable {
    name: String,
    metadata: TableMetadata,
}

impl BaseTable {
    pub fn new(name: impl Into<String>, metadata: TableMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    pub fn arced(self) -> Arc<BaseTable> {
        Arc::new(self)
    }
}

impl Table for BaseTable {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn location(&self) -> &str {
        &self.metadata.location
    }

    fn schema(&self) -> &str {
        &self.metadata.schema
    }

    fn spec(&self) -> &str {
        &self.metadata.partition_spec
    }

    fn properties(&self) -> &IndexMap<String, String> {
        &self.metadata.properties
    }
}
