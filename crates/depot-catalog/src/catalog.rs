use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use depot_core::{parse_index_str, IndexError, PackageRecord, PackageSource, PackageVersion, INDEX_FILE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog '{name}' is unavailable: {}", .root.display())]
    CatalogUnavailable { name: String, root: PathBuf },
    #[error("catalog '{name}' has no index file: {}", .path.display())]
    IndexMissing { name: String, path: PathBuf },
    #[error("catalog '{name}' has an unreadable index: {}", .path.display())]
    IndexUnreadable {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog '{name}' has an invalid index: {}", .path.display())]
    IndexInvalid {
        name: String,
        path: PathBuf,
        #[source]
        source: IndexError,
    },
}

/// Read-only package source backed by a directory with an index file.
/// Loaded once at construction; either every entry loads or construction
/// fails.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    root: PathBuf,
    records: BTreeMap<String, PackageRecord>,
}

impl Catalog {
    pub fn load(name: impl Into<String>, root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let name = name.into();
        let root = root.into();
        if !root.is_dir() {
            return Err(CatalogError::CatalogUnavailable { name, root });
        }

        let path = root.join(INDEX_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::IndexMissing { name, path });
            }
            Err(err) => {
                return Err(CatalogError::IndexUnreadable {
                    name,
                    path,
                    source: err,
                });
            }
        };

        let records = parse_index_str(&content).map_err(|err| CatalogError::IndexInvalid {
            name: name.clone(),
            path,
            source: err,
        })?;

        Ok(Self {
            name,
            root,
            records,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Location of the record's archive under the catalog root, if the
    /// record carries one.
    pub fn archive_path(&self, record: &PackageRecord) -> Option<PathBuf> {
        record.file.as_ref().map(|file| self.root.join(file))
    }
}

impl PackageSource for Catalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, package: &str) -> Option<&PackageRecord> {
        self.records.get(package)
    }

    fn list(&self) -> Vec<(String, PackageVersion)> {
        self.records
            .iter()
            .map(|(name, record)| (name.clone(), record.version.clone()))
            .collect()
    }
}
