//! # Package Manager Registry
//!
//! Owns the descriptors opk knows about and picks the active one.
//!
//! The registry is an ordinary value: the dispatcher builds it once per run
//! and hands references to the loader, normalizer and router. There is no
//! module-level state.
//!
//! ## Lockfile inference
//!
//! Without a `package.kdl`, the manager is inferred from the lockfiles in
//! the project root. The first entry of [`LOCKFILE_PRIORITY`] that exists
//! wins; with none present the default manager (bun) is used. npm's lockfile
//! is checked last so that a project carrying both `package-lock.json` and
//! another manager's lockfile resolves to the other manager.

use crate::error::{OpkError, Result};
use crate::packages::builtin::{self, get_builtin_managers};
use crate::packages::descriptor::ManagerDescriptor;
use std::fmt;
use std::path::Path;

/// Lockfile name → manager name, highest priority first
pub const LOCKFILE_PRIORITY: &[(&str, &str)] = &[
    ("bun.lock", "bun"),
    ("bun.lockb", "bun"),
    ("pnpm-lock.yaml", "pnpm"),
    ("yarn.lock", "yarn"),
    ("deno.lock", "deno"),
    ("package-lock.json", "npm"),
];

/// How the active manager was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmSource {
    Config,
    Lockfile(&'static str),
    Default,
}

impl fmt::Display for PmSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "package.kdl"),
            Self::Lockfile(name) => write!(f, "lockfile {}", name),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PmSelection {
    pub manager: ManagerDescriptor,
    pub source: PmSource,
}

impl PmSelection {
    pub fn from_config(manager: ManagerDescriptor) -> Self {
        Self {
            manager,
            source: PmSource::Config,
        }
    }

    pub fn is_inferred(&self) -> bool {
        self.source != PmSource::Config
    }
}

pub struct ManagerRegistry {
    managers: Vec<ManagerDescriptor>,
    default: ManagerDescriptor,
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagerRegistry {
    /// Registry of the built-in managers, defaulting to bun
    pub fn new() -> Self {
        Self {
            managers: get_builtin_managers(),
            default: builtin::BUN,
        }
    }

    pub fn describe(&self, name: &str) -> Result<&ManagerDescriptor> {
        self.managers
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| OpkError::UnknownManager(name.to_string()))
    }

    pub fn default_manager(&self) -> &ManagerDescriptor {
        &self.default
    }

    /// Choose a manager from the lockfiles present in `dir`
    pub fn detect_from_lockfiles(&self, dir: &Path) -> PmSelection {
        self.select_by_lockfiles(|lockfile| dir.join(lockfile).is_file())
    }

    /// Pure selection over a presence predicate.
    ///
    /// Lockfiles whose manager is not registered are skipped.
    pub fn select_by_lockfiles<F>(&self, is_present: F) -> PmSelection
    where
        F: Fn(&str) -> bool,
    {
        for (lockfile, manager) in LOCKFILE_PRIORITY {
            if is_present(lockfile)
                && let Ok(descriptor) = self.describe(manager)
            {
                return PmSelection {
                    manager: *descriptor,
                    source: PmSource::Lockfile(lockfile),
                };
            }
        }

        PmSelection {
            manager: self.default,
            source: PmSource::Default,
        }
    }
}
