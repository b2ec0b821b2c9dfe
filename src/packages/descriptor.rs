use crate::core::types::ManagerVerb;

/// `lockFlags` table of a package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockFlags {
    /// Update the lockfile without touching installed modules
    pub lock_only: &'static str,
    /// Fail instead of updating the lockfile
    pub frozen_lockfile: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreFlags {
    pub scripts: &'static str,
    pub engines: &'static str,
    pub optional: &'static str,
    pub workspace_root_check: &'static str,
    pub pnp: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeFlags {
    pub production: &'static str,
    pub dev: &'static str,
    pub peer: &'static str,
    pub optional: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFlags {
    pub verbose: &'static str,
    pub silent: &'static str,
}

/// Describes one package manager: its command templates and how it spells
/// each shared flag.
///
/// A template is a program followed by its leading arguments, e.g.
/// `"npm uninstall"`. Any empty string, template or flag, means the manager
/// does not support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerDescriptor {
    pub name: &'static str,
    pub install: &'static str,
    pub add: &'static str,
    pub remove: &'static str,
    pub update: &'static str,
    pub audit: &'static str,
    pub run: &'static str,
    pub exec: &'static str,
    pub lock_flags: LockFlags,
    pub ignore_flags: IgnoreFlags,
    pub scope_flags: ScopeFlags,
    pub output_flags: OutputFlags,
}

impl ManagerDescriptor {
    /// Command template backing a manager verb
    pub fn template_for(&self, verb: ManagerVerb) -> &'static str {
        match verb {
            ManagerVerb::Add => self.add,
            ManagerVerb::Remove => self.remove,
            ManagerVerb::Install => self.install,
            ManagerVerb::Update => self.update,
            ManagerVerb::Audit => self.audit,
            ManagerVerb::Run => self.run,
            ManagerVerb::Exec => self.exec,
        }
    }
}
