use snafu::Snafu;

use crate::Identifier;

/// Catalog Result
pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;

/// Catalog Error
///
/// Messages of the addressing and lookup errors are displayed verbatim.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CatalogError {
    /// A required request argument was not given, e.g. the table location on load.
    #[snafu(display("{message}"))]
    IllegalArgument { message: String },

    /// A required table property was not given on create or drop.
    #[snafu(display("{message}"))]
    MissingValue { message: String },

    /// The catalog configuration is incomplete.
    #[snafu(display("{message}"))]
    Configuration { message: String },

    #[snafu(display("{message}"))]
    Unsupported { message: String },

    #[snafu(display("{message}"))]
    NoSuchTable { message: String },

    #[snafu(display("{message}"))]
    NoSuchNamespace { message: String },

    #[snafu(display("{message}"))]
    AlreadyExists { message: String },

    #[snafu(display("Invalid identifier {input}!"))]
    InvalidIdentifier { input: String },

    #[snafu(display("Unable to read table metadata {path}: {source}"))]
    UnableToReadMetadata {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Unable to write table metadata {path}: {source}"))]
    UnableToWriteMetadata {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("Unable to parse table metadata {path}: {source}"))]
    UnableToParseMetadata {
        path: String,
        source: serde_json::Error,
    },

    #[snafu(display("Unable to drop table at {path}: {source}"))]
    UnableToDropTable {
        path: String,
        source: std::io::Error,
    },
}

impl CatalogError {
    #[inline]
    pub fn illegal_argument<S: Into<String>>(message: S) -> CatalogError {
        CatalogError::IllegalArgument {
            message: message.into(),
        }
    }

    #[inline]
    pub fn missing_value<S: Into<String>>(message: S) -> CatalogError {
        CatalogError::MissingValue {
            message: message.into(),
        }
    }

    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> CatalogError {
        CatalogError::Configuration {
            message: message.into(),
        }
    }

    #[inline]
    pub fn unsupported<S: Into<String>>(message: S) -> CatalogError {
        CatalogError::Unsupported {
            message: message.into(),
        }
    }

    pub fn table_not_found(ident: &Identifier) -> CatalogError {
        CatalogError::NoSuchTable {
            message: format!("Table does not exist: {ident}"),
        }
    }

    pub fn table_not_found_at(location: &str) -> CatalogError {
        CatalogError::NoSuchTable {
            message: format!("Table does not exist at location: {location}"),
        }
    }

    pub fn namespace_not_found(namespace: &str) -> CatalogError {
        CatalogError::NoSuchNamespace {
            message: format!("Namespace does not exist: {namespace}"),
        }
    }

    pub fn table_already_exists(ident: &Identifier) -> CatalogError {
        CatalogError::AlreadyExists {
            message: format!("Table already exists: {ident}"),
        }
    }

    pub fn table_already_exists_at(location: &str) -> CatalogError {
        CatalogError::AlreadyExists {
            message: format!("Table already exists at location: {location}"),
        }
    }

    #[inline]
    pub fn invalid_identifier<S: Into<String>>(input: S) -> CatalogError {
        CatalogError::InvalidIdentifier {
            input: input.into(),
        }
    }
}

impl From<CatalogError> for common_error::TablecatError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::IllegalArgument { message } | CatalogError::MissingValue { message } => {
                common_error::TablecatError::ValueError(message)
            }
            other => common_error::TablecatError::CatalogError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use common_error::TablecatError;

    use super::*;

    #[test]
    fn test_not_found_messages() {
        let ident = Identifier::new(vec!["test".to_string()], "table".to_string());
        assert_eq!(
            CatalogError::table_not_found(&ident).to_string(),
            "Table does not exist: test.table"
        );
        assert_eq!(
            CatalogError::table_not_found_at("/tmp/hadoop_tables").to_string(),
            "Table does not exist at location: /tmp/hadoop_tables"
        );
    }

    #[test]
    fn test_into_tablecat_error() {
        let err: TablecatError = CatalogError::missing_value("Table schema not set").into();
        assert!(matches!(err, TablecatError::ValueError(ref m) if m == "Table schema not set"));

        let err: TablecatError = CatalogError::unsupported("Unknown catalog type: fooType").into();
        assert_eq!(err.to_string(), "Unknown catalog type: fooType");
    }
}
