//! Dependency changes between the manifest and package.kdl
//!
//! After a manager command the manifest is the freshest record of what the
//! project depends on. These changes are folded back into the config so the
//! next regeneration does not undo them.

use crate::config::types::{DependencyKind, DependencyMap, DependencySet};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChange {
    pub kind: DependencyKind,
    pub name: String,
    /// `None` removes the entry
    pub version: Option<String>,
}

/// Changes to apply to `config`.
///
/// With a `baseline` (the manifest before a manager command ran) every
/// entry the command added, changed or removed is carried over. Without
/// one, entries only the manifest has are imported and the config wins
/// everywhere else.
pub fn compute(
    config: &DependencySet,
    manifest: &DependencySet,
    baseline: Option<&DependencySet>,
) -> Vec<DependencyChange> {
    let mut changes = Vec::new();

    for kind in DependencyKind::ALL {
        let empty = DependencyMap::new();
        let current = manifest.get(kind).unwrap_or(&empty);

        match baseline {
            Some(before) => {
                let before = before.get(kind).unwrap_or(&empty);
                let names: BTreeSet<&String> = before.keys().chain(current.keys()).collect();
                for name in names {
                    let now = current.get(name);
                    if now == before.get(name) {
                        continue;
                    }
                    if config.version_of(kind, name) == now.map(String::as_str) {
                        continue;
                    }
                    changes.push(DependencyChange {
                        kind,
                        name: name.clone(),
                        version: now.cloned(),
                    });
                }
            }
            None => {
                for (name, version) in current {
                    if config.version_of(kind, name).is_none() {
                        changes.push(DependencyChange {
                            kind,
                            name: name.clone(),
                            version: Some(version.clone()),
                        });
                    }
                }
            }
        }
    }

    changes
}

/// The complete new map of every kind touched by `changes`
pub fn apply(
    config: &DependencySet,
    changes: &[DependencyChange],
) -> BTreeMap<DependencyKind, DependencyMap> {
    let mut sections: BTreeMap<DependencyKind, DependencyMap> = BTreeMap::new();

    for change in changes {
        let map = sections
            .entry(change.kind)
            .or_insert_with(|| config.get(change.kind).cloned().unwrap_or_default());
        match &change.version {
            Some(version) => {
                map.insert(change.name.clone(), version.clone());
            }
            None => {
                map.remove(&change.name);
            }
        }
    }

    sections
}
