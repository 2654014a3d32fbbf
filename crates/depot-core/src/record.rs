use serde::{Deserialize, Serialize};

use crate::version::PackageVersion;

/// One package entry as it appears in an index file. The name is the section
/// key, not a key-value pair, so serde skips it and the index parser fills
/// it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(skip)]
    pub name: String,
    pub version: PackageVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(
        rename = "dependences",
        default,
        with = "comma_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<String>,
}

impl PackageRecord {
    /// Copy of this record under a new name, used when transferring a
    /// catalog entry into the ledger.
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: self.version.clone(),
            file: self.file.clone(),
            dependencies: self.dependencies.clone(),
        }
    }
}

/// The `dependences` key holds a comma-separated list, whitespace trimmed.
mod comma_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&values.join(", "))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }
}
