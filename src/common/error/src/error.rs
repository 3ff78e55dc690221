use thiserror::Error;

pub type TablecatResult<T> = std::result::Result<T, TablecatError>;

/// Errors surfaced to the host engine.
#[derive(Debug, Error)]
pub enum TablecatError {
    #[error("{0:?}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("{0}")]
    CatalogError(String),
    #[error("{0}")]
    ValueError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_variants_display_verbatim() {
        let err = TablecatError::CatalogError("Table location not set".to_string());
        assert_eq!(err.to_string(), "Table location not set");

        let err = TablecatError::ValueError("bad value".to_string());
        assert_eq!(err.to_string(), "bad value");
    }

    #[test]
    fn test_from_serde_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TablecatError = source.into();
        assert!(matches!(err, TablecatError::SerdeJsonError(_)));
    }
}
