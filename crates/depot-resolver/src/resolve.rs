use std::collections::{BTreeMap, BTreeSet};

use depot_core::PackageSource;

use crate::order::install_order;
use crate::types::{ResolveError, ResolvedClosure};

/// Decides which single catalog owns a package name. Zero owners and
/// multiple owners are both errors; the latter carries every claimant.
pub fn classify<'a, S: PackageSource>(
    catalogs: &'a [S],
    package: &str,
) -> Result<&'a S, ResolveError> {
    let mut owners = catalogs
        .iter()
        .filter(|catalog| catalog.find(package).is_some());

    let Some(first) = owners.next() else {
        return Err(ResolveError::PackageNotFound(package.to_string()));
    };

    let rest: Vec<&S> = owners.collect();
    if rest.is_empty() {
        return Ok(first);
    }

    let mut names = vec![first.name().to_string()];
    names.extend(rest.iter().map(|catalog| catalog.name().to_string()));
    Err(ResolveError::AmbiguousPackage {
        name: package.to_string(),
        catalogs: names,
    })
}

/// Breadth-first expansion of the requested set into its transitive
/// dependency closure. The visited set both deduplicates and guarantees
/// termination on cyclic declarations.
pub fn resolve<S: PackageSource>(
    catalogs: &[S],
    requested: &[String],
) -> Result<ResolvedClosure, ResolveError> {
    let mut visited: BTreeSet<String> = requested.iter().cloned().collect();
    let mut frontier: Vec<String> = visited.iter().cloned().collect();
    let mut dependencies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for name in &frontier {
            let catalog = classify(catalogs, name)?;
            let edges = dependencies.entry(name.clone()).or_default();
            for dep in catalog.dependencies_of(name) {
                edges.insert(dep.clone());
                if visited.insert(dep.clone()) {
                    next.push(dep);
                }
            }
        }
        frontier = next;
    }

    Ok(ResolvedClosure {
        install_order: install_order(&dependencies),
        dependencies,
    })
}
