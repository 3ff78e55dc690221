//! Table metadata as stored by the built-in filesystem-backed catalogs.
//!
//! A table's metadata lives at `<location>/metadata/table-metadata.json`.
//! Locations are local paths, optionally prefixed with `file://`.

use std::{
    fs::{self, OpenOptions},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::{
    error::{
        CatalogResult, UnableToDropTableSnafu, UnableToParseMetadataSnafu,
        UnableToReadMetadataSnafu, UnableToWriteMetadataSnafu,
    },
    TableSource,
};

/// Serialized partition spec of an unpartitioned table.
pub const UNPARTITIONED_SPEC: &str = r#"{"spec-id":0,"fields":[]}"#;

const METADATA_DIR: &str = "metadata";
const METADATA_FILE: &str = "table-metadata.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableMetadata {
    pub location: String,
    pub schema: String,
    pub partition_spec: String,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

impl TableMetadata {
    pub fn new(location: impl Into<String>, source: &TableSource) -> Self {
        Self {
            location: location.into(),
            schema: source.schema.clone(),
            partition_spec: source
                .partition_spec
                .clone()
                .unwrap_or_else(|| UNPARTITIONED_SPEC.to_string()),
            properties: source.properties.clone(),
        }
    }

    /// Reads the metadata of the table at `location`, `None` if there is no table.
    pub fn read(location: &str) -> CatalogResult<Option<Self>> {
        let path = metadata_path(location);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).context(UnableToReadMetadataSnafu {
                    path: path.display().to_string(),
                })
            }
        };
        let metadata = serde_json::from_str(&contents).context(UnableToParseMetadataSnafu {
            path: path.display().to_string(),
        })?;
        Ok(Some(metadata))
    }

    /// Writes the metadata of a new table, returns false if a table already exists there.
    pub fn create(&self) -> CatalogResult<bool> {
        let path = metadata_path(&self.location);
        let display = path.display().to_string();
        let contents = serde_json::to_vec_pretty(self).context(UnableToParseMetadataSnafu {
            path: display.clone(),
        })?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context(UnableToWriteMetadataSnafu {
                path: display.clone(),
            })?;
        }
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => return Err(err).context(UnableToWriteMetadataSnafu { path: display }),
        };
        write_or_remove(&path, &mut file, &contents)
            .context(UnableToWriteMetadataSnafu { path: display })?;
        Ok(true)
    }
}

/// Writes `contents` to the freshly created file at `path`, deleting it again on failure.
fn write_or_remove(path: &Path, file: &mut impl Write, contents: &[u8]) -> io::Result<()> {
    let written = file.write_all(contents).and_then(|()| file.flush());
    if written.is_err() {
        if let Err(err) = fs::remove_file(path) {
            warn!("Failed to remove partial table metadata {}: {err}", path.display());
        }
    }
    written
}

/// Returns true iff a table exists at `location`.
pub fn exists(location: &str) -> bool {
    metadata_path(location).is_file()
}

/// Deletes the table at `location` with its data, returns false if there is no table.
pub fn remove(location: &str) -> CatalogResult<bool> {
    if !exists(location) {
        return Ok(false);
    }
    let dir = local_path(location);
    fs::remove_dir_all(&dir).context(UnableToDropTableSnafu {
        path: dir.display().to_string(),
    })?;
    Ok(true)
}

/// Strips the `file://` scheme of a location.
pub fn local_path(location: &str) -> PathBuf {
    Path::new(location.strip_prefix("file://").unwrap_or(location)).to_path_buf()
}

fn metadata_path(location: &str) -> PathBuf {
    local_path(location).join(METADATA_DIR).join(METADATA_FILE)
}

/// Joins path segments under a root location with `/`.
pub fn join_location<'a>(root: &str, segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut location = root.trim_end_matches('/').to_string();
    for segment in segments {
        location.push('/');
        location.push_str(segment);
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> TableSource {
        TableSource::new(r#"{"type":"struct","fields":[]}"#)
            .with_properties(IndexMap::from([("dummy".to_string(), "test".to_string())]))
    }

    #[test]
    fn test_create_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("tbl").display().to_string();

        assert_eq!(TableMetadata::read(&location).unwrap(), None);

        let metadata = TableMetadata::new(&location, &source());
        assert!(metadata.create().unwrap());
        assert!(!metadata.create().unwrap());
        assert!(exists(&location));

        let read = TableMetadata::read(&location).unwrap().unwrap();
        assert_eq!(read, metadata);
        assert_eq!(read.partition_spec, UNPARTITIONED_SPEC);
        assert_eq!(read.properties.get("dummy").map(String::as_str), Some("test"));

        assert!(remove(&location).unwrap());
        assert!(!remove(&location).unwrap());
        assert!(!local_path(&location).exists());
    }

    #[test]
    fn test_failed_write_leaves_no_metadata() {
        struct FullDisk;

        impl Write for FullDisk {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::Other, "no space left on device"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("tbl").display().to_string();
        let path = metadata_path(&location);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::File::create(&path).unwrap();

        assert!(write_or_remove(&path, &mut FullDisk, b"{}").is_err());
        assert!(!path.exists());
        assert_eq!(TableMetadata::read(&location).unwrap(), None);
        assert!(TableMetadata::new(&location, &source()).create().unwrap());
    }

    #[test]
    fn test_file_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let location = format!("file://{}/tbl", dir.path().display());
        TableMetadata::new(&location, &source()).create().unwrap();
        assert!(dir.path().join("tbl/metadata/table-metadata.json").is_file());
    }

    #[test]
    fn test_corrupt_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().display().to_string();
        fs::create_dir_all(dir.path().join(METADATA_DIR)).unwrap();
        fs::write(dir.path().join(METADATA_DIR).join(METADATA_FILE), "{").unwrap();
        let err = TableMetadata::read(&location).unwrap_err();
        assert!(matches!(
            err,
            crate::CatalogError::UnableToParseMetadata { .. }
        ));
    }

    #[test]
    fn test_join_location() {
        assert_eq!(join_location("/w/", ["test", "table"]), "/w/test/table");
        assert_eq!(join_location("/w", []), "/w");
    }
}
