use crate::record::PackageRecord;
use crate::version::PackageVersion;

/// Read contract shared by catalogs and the ledger. The ledger satisfies
/// the same queries as any catalog; only mutation is ledger-specific.
pub trait PackageSource {
    fn name(&self) -> &str;

    fn find(&self, package: &str) -> Option<&PackageRecord>;

    /// (name, version) pairs in canonical index order.
    fn list(&self) -> Vec<(String, PackageVersion)>;

    /// Declared dependency names; an absent field is an empty list, not an
    /// error.
    fn dependencies_of(&self, package: &str) -> Vec<String> {
        self.find(package)
            .map(|record| record.dependencies.clone())
            .unwrap_or_default()
    }
}
