use std::collections::BTreeMap;

use thiserror::Error;

use crate::record::PackageRecord;

pub const INDEX_FILE: &str = "index.ini";

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("invalid index file")]
    Syntax(#[from] toml::de::Error),
    #[error("failed to render index file")]
    Render(#[from] toml::ser::Error),
    #[error("index contains a package entry with an empty name")]
    EmptyName,
}

/// Parses the sectioned key-value index format. Either every entry loads or
/// the whole parse fails; there is no partial result.
pub fn parse_index_str(input: &str) -> Result<BTreeMap<String, PackageRecord>, IndexError> {
    let mut records: BTreeMap<String, PackageRecord> = toml::from_str(input)?;
    for (name, record) in &mut records {
        if name.trim().is_empty() {
            return Err(IndexError::EmptyName);
        }
        record.name = name.clone();
    }
    Ok(records)
}

/// Canonical rendering: one section per package, sections in name order.
pub fn render_index_str(records: &BTreeMap<String, PackageRecord>) -> Result<String, IndexError> {
    Ok(toml::to_string(records)?)
}
