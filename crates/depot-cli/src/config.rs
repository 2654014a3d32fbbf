use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use depot_catalog::Catalog;
use serde::Deserialize;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "depot.toml";

/// The configuration only supplies locations: which catalogs exist and
/// where the ledger lives.
#[derive(Debug, Deserialize)]
pub(crate) struct Config {
    pub catalogs: BTreeMap<String, PathBuf>,
    pub ledger: LedgerSection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LedgerSection {
    pub dir: PathBuf,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse configuration file: {}", path.display()))?;
        if config.catalogs.is_empty() {
            bail!("configuration names no catalogs: {}", path.display());
        }
        Ok(config)
    }

    /// Catalog construction is fail-fast: one broken catalog aborts the
    /// invocation.
    pub fn open_catalogs(&self) -> Result<Vec<Catalog>> {
        let mut catalogs = Vec::with_capacity(self.catalogs.len());
        for (name, root) in &self.catalogs {
            catalogs.push(Catalog::load(name.clone(), root.clone())?);
        }
        Ok(catalogs)
    }
}
