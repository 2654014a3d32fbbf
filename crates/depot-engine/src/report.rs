use std::path::PathBuf;

use depot_core::PackageVersion;

/// What happened to one package during a batch. Everything here is
/// per-package and non-fatal; batch-level failures surface as errors from
/// the engine itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Installed {
        version: PackageVersion,
    },
    Updated {
        previous: PackageVersion,
        version: PackageVersion,
    },
    AlreadyInstalled {
        version: PackageVersion,
    },
    Removed {
        version: PackageVersion,
    },
    NotFound,
    Ambiguous {
        catalogs: Vec<String>,
    },
    NotInstalled,
    /// The ledger entry pointed at a payload directory that no longer
    /// exists; the stale entry has been dropped.
    CorruptedLedgerEntry {
        version: PackageVersion,
        path: PathBuf,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageReport {
    pub package: String,
    pub outcome: TransitionOutcome,
    /// Exit code of the lifecycle script, when one ran and could be
    /// observed. Never gates the ledger mutation.
    pub script_exit: Option<i32>,
}

impl PackageReport {
    pub(crate) fn new(package: &str, outcome: TransitionOutcome) -> Self {
        Self {
            package: package.to_string(),
            outcome,
            script_exit: None,
        }
    }

    pub(crate) fn with_script_exit(mut self, script_exit: Option<i32>) -> Self {
        self.script_exit = script_exit;
        self
    }
}
