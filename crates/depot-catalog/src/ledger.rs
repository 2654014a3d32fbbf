use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use depot_core::{
    parse_index_str, render_index_str, PackageRecord, PackageSource, PackageVersion, INDEX_FILE,
};
use thiserror::Error;

pub const LEDGER_NAME: &str = "ledger";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("package '{0}' is not installed")]
    PackageNotInstalled(String),
}

/// An installed package whose catalog carries a newer version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCandidate {
    pub name: String,
    pub installed: PackageVersion,
    pub available: PackageVersion,
}

/// Mutable, persisted record of installed packages. Satisfies the same read
/// contract as a catalog; mutations stay in memory until `persist`.
#[derive(Debug)]
pub struct Ledger {
    root: PathBuf,
    records: BTreeMap<String, PackageRecord>,
}

impl Ledger {
    /// Opens the ledger, creating the directory and an empty index on first
    /// use. Safe to call on every startup.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create ledger directory: {}", root.display()))?;

        let path = root.join(INDEX_FILE);
        if !path.exists() {
            fs::write(&path, "")
                .with_context(|| format!("failed to create ledger index: {}", path.display()))?;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read ledger index: {}", path.display()))?;
        let records = parse_index_str(&content)
            .with_context(|| format!("failed to parse ledger index: {}", path.display()))?;

        Ok(Self { root, records })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Directory holding the unpacked payload of one installed version.
    pub fn package_dir(&self, package: &str, version: &PackageVersion) -> PathBuf {
        self.root.join(package).join(version.as_str())
    }

    pub fn record_install(&mut self, package: &str, source: &PackageRecord) {
        self.records
            .insert(package.to_string(), source.renamed(package));
    }

    /// Replaces the entry wholesale: fields the source record lacks are
    /// cleared, never left stale.
    pub fn record_update(&mut self, package: &str, source: &PackageRecord) {
        self.records
            .insert(package.to_string(), source.renamed(package));
    }

    pub fn record_removal(&mut self, package: &str) -> Result<PackageRecord, LedgerError> {
        self.records
            .remove(package)
            .ok_or_else(|| LedgerError::PackageNotInstalled(package.to_string()))
    }

    /// Writes the whole index to a temporary file and renames it into
    /// place, so a crash mid-write cannot leave a truncated index.
    pub fn persist(&self) -> Result<()> {
        let content = render_index_str(&self.records)
            .context("failed to render ledger index")?;
        let path = self.index_path();
        let staging = self.root.join(format!("{INDEX_FILE}.tmp"));
        fs::write(&staging, content)
            .with_context(|| format!("failed to write ledger index: {}", staging.display()))?;
        fs::rename(&staging, &path).with_context(|| {
            format!(
                "failed to move ledger index into place: {} -> {}",
                staging.display(),
                path.display()
            )
        })
    }

    /// Entries present in both the ledger and the given catalog where the
    /// catalog version is newer.
    pub fn updates_against(&self, catalog: &impl PackageSource) -> Vec<UpdateCandidate> {
        self.records
            .iter()
            .filter_map(|(name, record)| {
                let available = catalog.find(name)?;
                (record.version < available.version).then(|| UpdateCandidate {
                    name: name.clone(),
                    installed: record.version.clone(),
                    available: available.version.clone(),
                })
            })
            .collect()
    }
}

impl PackageSource for Ledger {
    fn name(&self) -> &str {
        LEDGER_NAME
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
