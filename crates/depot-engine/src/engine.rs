use std::fs;

use anyhow::{Context, Result};
use depot_catalog::{Catalog, Ledger};
use depot_core::{PackageRecord, PackageSource};
use depot_resolver::{classify, resolve, ResolveError};

use crate::report::{PackageReport, TransitionOutcome};
use crate::script::{LifecycleMode, LifecycleRunner};
use crate::unpack::Unpacker;

/// Drives install/update/remove batches against the ledger. Resolution
/// failures abort a batch before any mutation; per-package failures are
/// reported and the batch continues. The ledger is persisted exactly once
/// per batch.
pub struct TransitionEngine<'a, U, R> {
    catalogs: &'a [Catalog],
    ledger: &'a mut Ledger,
    unpacker: U,
    runner: R,
}

impl<'a, U: Unpacker, R: LifecycleRunner> TransitionEngine<'a, U, R> {
    pub fn new(catalogs: &'a [Catalog], ledger: &'a mut Ledger, unpacker: U, runner: R) -> Self {
        Self {
            catalogs,
            ledger,
            unpacker,
            runner,
        }
    }

    pub fn install(&mut self, requested: &[String]) -> Result<Vec<PackageReport>> {
        let closure = resolve(self.catalogs, requested)?;

        let mut reports = Vec::with_capacity(closure.len());
        for name in &closure.install_order {
            reports.push(self.install_one(name));
        }

        self.ledger.persist()?;
        Ok(reports)
    }

    pub fn remove(&mut self, requested: &[String]) -> Result<Vec<PackageReport>> {
        let closure = resolve(self.catalogs, requested)?;

        let mut reports = Vec::with_capacity(closure.len());
        // Dependents go before the dependencies they rely on.
        for name in closure.install_order.iter().rev() {
            reports.push(self.remove_one(name));
        }

        self.ledger.persist()?;
        Ok(reports)
    }

    fn install_one(&mut self, name: &str) -> PackageReport {
        let catalog = match classify(self.catalogs, name) {
            Ok(catalog) => catalog,
            Err(ResolveError::PackageNotFound(_)) => {
                return PackageReport::new(name, TransitionOutcome::NotFound);
            }
            Err(ResolveError::AmbiguousPackage { catalogs, .. }) => {
                return PackageReport::new(name, TransitionOutcome::Ambiguous { catalogs });
            }
        };
        let Some(record) = catalog.find(name) else {
            return PackageReport::new(name, TransitionOutcome::NotFound);
        };

        let installed = self.ledger.find(name).map(|entry| entry.version.clone());
        match installed {
            Some(previous) if previous < record.version => {
                match self.stage_payload(catalog, record) {
                    Ok(script_exit) => {
                        self.ledger.record_update(name, record);
                        PackageReport::new(
                            name,
                            TransitionOutcome::Updated {
                                previous,
                                version: record.version.clone(),
                            },
                        )
                        .with_script_exit(script_exit)
                    }
                    Err(err) => PackageReport::new(
                        name,
                        TransitionOutcome::Failed {
                            message: format!("{err:#}"),
                        },
                    ),
                }
            }
            Some(version) => {
                PackageReport::new(name, TransitionOutcome::AlreadyInstalled { version })
            }
            None => match self.stage_payload(catalog, record) {
                Ok(script_exit) => {
                    self.ledger.record_install(name, record);
                    PackageReport::new(
                        name,
                        TransitionOutcome::Installed {
                            version: record.version.clone(),
                        },
                    )
                    .with_script_exit(script_exit)
                }
                Err(err) => PackageReport::new(
                    name,
                    TransitionOutcome::Failed {
                        message: format!("{err:#}"),
                    },
                ),
            },
        }
    }

    /// Unpacks the catalog archive into the package-version directory and
    /// runs the install script there. Metapackages have neither. The script
    /// exit code is observed, not enforced; a script that cannot run at all
    /// is reported as unobserved.
    fn stage_payload(&self, catalog: &Catalog, record: &PackageRecord) -> Result<Option<i32>> {
        let Some(archive) = catalog.archive_path(record) else {
            return Ok(None);
        };

        let dst = self.ledger.package_dir(&record.name, &record.version);
        if dst.exists() {
            fs::remove_dir_all(&dst).with_context(|| {
                format!(
                    "failed to replace existing payload directory: {}",
                    dst.display()
                )
            })?;
        }
        fs::create_dir_all(&dst)
            .with_context(|| format!("failed to create payload directory: {}", dst.display()))?;

        self.unpacker.unpack(&archive, &dst)?;

        Ok(self.runner.run(&dst, LifecycleMode::Install).ok())
    }

    fn remove_one(&mut self, name: &str) -> PackageReport {
        let Some(entry) = self.ledger.find(name) else {
            return PackageReport::new(name, TransitionOutcome::NotInstalled);
        };
        let version = entry.version.clone();
        let has_payload = entry.file.is_some();

        let mut script_exit = None;
        if has_payload {
            let dir = self.ledger.package_dir(name, &version);
            if !dir.is_dir() {
                // The payload is gone; drop the stale entry so state
                // converges instead of halting the batch.
                let _ = self.ledger.record_removal(name);
                return PackageReport::new(
                    name,
                    TransitionOutcome::CorruptedLedgerEntry { version, path: dir },
                );
            }

            script_exit = self.runner.run(&dir, LifecycleMode::Remove).ok();
            if let Err(err) = fs::remove_dir_all(&dir) {
                return PackageReport::new(
                    name,
                    TransitionOutcome::Failed {
                        message: format!(
                            "failed to delete payload directory {}: {err}",
                            dir.display()
                        ),
                    },
                )
                .with_script_exit(script_exit);
            }
        }

        match self.ledger.record_removal(name) {
            Ok(removed) => PackageReport::new(
                name,
                TransitionOutcome::Removed {
                    version: removed.version,
                },
            )
            .with_script_exit(script_exit),
            Err(err) => PackageReport::new(
                name,
                TransitionOutcome::Failed {
                    message: err.to_string(),
                },
            ),
        }
    }
}
