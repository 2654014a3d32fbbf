use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Resolution failures abort the whole batch: an unresolvable or ambiguous
/// name invalidates the dependency closure before any mutation happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("package '{0}' was not found in any catalog")]
    PackageNotFound(String),
    #[error("package '{name}' is declared by multiple catalogs: {}", .catalogs.join(", "))]
    AmbiguousPackage { name: String, catalogs: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct ResolvedClosure {
    /// Every resolved name, dependencies before dependents.
    pub install_order: Vec<String>,
    /// Dependency edges discovered during expansion, keyed by dependent.
    pub dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl ResolvedClosure {
    pub fn len(&self) -> usize {
        self.install_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.install_order.is_empty()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }
}
