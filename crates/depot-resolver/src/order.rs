use std::collections::{BTreeMap, BTreeSet};

/// Kahn's algorithm over the closure's dependency edges, dependencies
/// first. Members of a cycle cannot be ordered; they are appended in name
/// order so the walk still covers the whole closure.
pub(crate) fn install_order(dependencies: &BTreeMap<String, BTreeSet<String>>) -> Vec<String> {
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for name in dependencies.keys() {
        in_degree.insert(name.as_str(), 0);
        dependents.insert(name.as_str(), BTreeSet::new());
    }

    for (name, edges) in dependencies {
        let mut within = 0;
        for dep in edges {
            if !dependencies.contains_key(dep) {
                continue;
            }
            within += 1;
            dependents
                .entry(dep.as_str())
                .or_default()
                .insert(name.as_str());
        }
        in_degree.insert(name.as_str(), within);
    }

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter_map(|(name, degree)| (*degree == 0).then_some(*name))
        .collect();
    let mut ordered: Vec<String> = Vec::with_capacity(dependencies.len());

    while let Some(next) = ready.pop_first() {
        ordered.push(next.to_string());
        if let Some(children) = dependents.get(next) {
            for child in children {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        ready.insert(*child);
                    }
                }
            }
        }
    }

    if ordered.len() != dependencies.len() {
        let placed: BTreeSet<String> = ordered.iter().cloned().collect();
        for name in dependencies.keys() {
            if !placed.contains(name.as_str()) {
                ordered.push(name.clone());
            }
        }
    }

    ordered
}
