//! Config synchronization
//!
//! Keeps package.kdl, package.json and the lockfiles of alternate managers
//! consistent after a mutating command:
//! - dependency changes made by the manager are folded into package.kdl (delta.rs)
//! - an optional kdlfmt pass over the config (formatting.rs)
//! - package.json is regenerated from the reloaded config
//! - each alternate manager refreshes its own lockfile

pub mod delta;
pub mod formatting;

use crate::config::editor;
use crate::config::loader::ConfigLoader;
use crate::config::types::{DependencySet, PackageConfig};
use crate::core::command_exec::{CommandRunner, Invocation, run_checked};
use crate::error::{OpkError, Result};
use crate::manifest;
use crate::packages::{ManagerDescriptor, ManagerRegistry};
use crate::project_identity;
use crate::ui;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Run kdlfmt when the project uses it
    pub format: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { format: true }
    }
}

impl SyncOptions {
    /// Defaults adjusted by `OPK_NO_FORMAT`
    pub fn from_env() -> Self {
        let disabled = std::env::var(project_identity::env_key("NO_FORMAT"))
            .is_ok_and(|v| !v.is_empty() && v != "0");
        Self { format: !disabled }
    }
}

/// What a sync did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Dependency entries written back into package.kdl
    pub config_changes: usize,
    pub formatted: bool,
    pub manifest_changed: bool,
    pub alternates: Vec<&'static str>,
}

pub struct SyncEngine<'a> {
    loader: ConfigLoader<'a>,
    runner: &'a dyn CommandRunner,
    options: SyncOptions,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        registry: &'a ManagerRegistry,
        runner: &'a dyn CommandRunner,
        options: SyncOptions,
    ) -> Self {
        Self {
            loader: ConfigLoader::new(registry),
            runner,
            options,
        }
    }

    /// Full protocol. `baseline` is the manifest's dependency set captured
    /// before a manager command ran, if one did.
    pub fn sync(
        &self,
        config_path: &Path,
        manifest_path: &Path,
        baseline: Option<&DependencySet>,
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        let project_dir = project_dir(config_path);

        let config = self.loader.load(config_path)?;

        // 1-2. fold the manager's dependency changes into package.kdl, reload
        let current = manifest::read_dependencies(manifest_path)?;
        let (mut config, changes) = self.fold_changes(config_path, config, &current, baseline)?;
        report.config_changes = changes;

        // 3. optional formatter
        if self.options.format && formatting::project_uses_formatter(project_dir, &config.scripts) {
            match formatting::format_config(self.runner, config_path, project_dir) {
                Ok(()) => report.formatted = true,
                Err(e) => ui::warning(&format!(
                    "{} failed, keeping {} unformatted: {}",
                    formatting::FORMATTER,
                    config_path.display(),
                    e
                )),
            }
            config = self.loader.load(config_path)?;
        }

        // 4. regenerate the manifest
        report.manifest_changed = manifest::write(&config, manifest_path)?;
        if report.manifest_changed {
            ui::success(&format!("Generated {}", manifest_path.display()));
        } else {
            ui::debug(&format!("{} already up to date", manifest_path.display()));
        }

        // 5. alternate lockfiles
        report.alternates = self.sync_alternates(&config, project_dir)?;

        Ok(report)
    }

    /// Make package.json match package.kdl before a manager command runs.
    ///
    /// Entries only the existing manifest has are imported first, so the
    /// regeneration never drops them. Returns the dependencies of the
    /// regenerated manifest, the baseline for the following `sync`.
    pub fn prepare(&self, config_path: &Path, manifest_path: &Path) -> Result<DependencySet> {
        let config = self.loader.load(config_path)?;
        let existing = manifest::read_dependencies(manifest_path)?;
        let (config, imported) = self.fold_changes(config_path, config, &existing, None)?;
        if imported > 0 {
            ui::info(&format!(
                "Imported {} dependenc{} from {}",
                imported,
                if imported == 1 { "y" } else { "ies" },
                manifest_path.display()
            ));
        }

        if manifest::write(&config, manifest_path)? {
            ui::debug(&format!("refreshed {}", manifest_path.display()));
        }
        manifest::read_dependencies(manifest_path)
    }

    /// Write the delta between `config` and `current` into the config file.
    /// Returns the config to continue with and the number of changes.
    fn fold_changes(
        &self,
        config_path: &Path,
        config: PackageConfig,
        current: &DependencySet,
        baseline: Option<&DependencySet>,
    ) -> Result<(PackageConfig, usize)> {
        let changes = delta::compute(&config.dependencies, current, baseline);
        if changes.is_empty() {
            return Ok((config, 0));
        }

        let sections = delta::apply(&config.dependencies, &changes);
        editor::write_dependency_sections(config_path, &sections)?;
        for change in &changes {
            match &change.version {
                Some(version) => ui::debug(&format!(
                    "{} {}@{} -> {}",
                    change.kind.kdl_name(),
                    change.name,
                    version,
                    config_path.display()
                )),
                None => ui::debug(&format!(
                    "{} {} removed from {}",
                    change.kind.kdl_name(),
                    change.name,
                    config_path.display()
                )),
            }
        }

        Ok((self.loader.load(config_path)?, changes.len()))
    }

    /// Regenerate the manifest only
    pub fn generate(&self, config_path: &Path, manifest_path: &Path) -> Result<PackageConfig> {
        let config = self.loader.load(config_path)?;
        if manifest::write(&config, manifest_path)? {
            ui::success(&format!("Generated {}", manifest_path.display()));
        } else {
            ui::info(&format!("{} already up to date", manifest_path.display()));
        }
        Ok(config)
    }

    /// Run `install <lock-only>` for every alternate manager, in order.
    /// Every alternate is checked before the first one runs.
    pub fn sync_alternates(
        &self,
        config: &PackageConfig,
        project_dir: &Path,
    ) -> Result<Vec<&'static str>> {
        let invocations = config
            .alt_pms
            .iter()
            .map(|alt| lock_only_invocation(alt, project_dir))
            .collect::<Result<Vec<_>>>()?;

        let mut done = Vec::with_capacity(invocations.len());
        for (alt, invocation) in config.alt_pms.iter().zip(&invocations) {
            ui::info(&format!("Updating {} lockfile", alt.name));
            run_checked(self.runner, invocation)?;
            done.push(alt.name);
        }
        Ok(done)
    }
}

fn lock_only_invocation(alt: &ManagerDescriptor, project_dir: &Path) -> Result<Invocation> {
    let flag = alt.lock_flags.lock_only;
    if flag.is_empty() {
        return Err(OpkError::UserConfigError(format!(
            "alt-pms entry {} has no lock-only install mode; remove it from alt-pms",
            alt.name
        )));
    }
    Invocation::from_template(
        alt.install,
        flag.split_whitespace().map(str::to_string),
        project_dir,
    )
}

fn project_dir(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
