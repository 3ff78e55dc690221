use std::fmt::Display;

use crate::error::{CatalogError, CatalogResult};

/// Namespace levels of an identifier, outermost first.
pub type Namespace = Vec<String>;

/// A table name, optionally qualified by a namespace: `table` or `ns.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    namespace: Namespace,
    name: String,
}

impl Identifier {
    pub fn new(namespace: Namespace, name: String) -> Self {
        Self { namespace, name }
    }

    /// Creates an identifier without a namespace.
    pub fn simple<S: Into<String>>(name: S) -> Self {
        Self::new(vec![], name.into())
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Splits a dotted name into namespace levels and the table name.
    ///
    /// Every level must be non-empty, otherwise the characters are taken as is.
    pub fn parse(input: &str) -> CatalogResult<Identifier> {
        let mut levels = input
            .split('.')
            .map(str::to_string)
            .collect::<Vec<String>>();
        if levels.iter().any(String::is_empty) {
            return Err(CatalogError::invalid_identifier(input));
        }
        // split always yields at least one level
        let name = levels.pop().unwrap_or_default();
        Ok(Identifier::new(levels, name))
    }

    /// Namespace levels followed by the name.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.namespace
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for level in &self.namespace {
            write!(f, "{level}.")?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("table", &[], "table")]
    #[case("test.table", &["test"], "table")]
    #[case("a.b.c", &["a", "b"], "c")]
    #[case("db.my-table", &["db"], "my-table")]
    #[case("db.2024_sales", &["db"], "2024_sales")]
    #[case("web.page-views", &["web"], "page-views")]
    fn test_parse(#[case] input: &str, #[case] namespace: &[&str], #[case] name: &str) {
        let ident = Identifier::parse(input).unwrap();
        assert_eq!(ident.namespace(), namespace);
        assert_eq!(ident.name(), name);
        assert_eq!(ident.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("a.")]
    #[case(".a")]
    #[case("a..b")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = Identifier::parse(input).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_levels() {
        let ident = Identifier::parse("test.table").unwrap();
        assert!(ident.has_namespace());
        assert_eq!(ident.levels().collect::<Vec<_>>(), vec!["test", "table"]);
        assert!(!Identifier::simple("t").has_namespace());
    }
}
