//! One module per CLI verb. Each takes the per-invocation [`Context`].

pub mod generate;
pub mod info;
pub mod init;
pub mod list;
pub mod migrate;
pub mod pm;
pub mod sync;

use crate::config::loader::ConfigLoader;
use crate::config::types::PackageConfig;
use crate::core::command_exec::CommandRunner;
use crate::core::flags::FlagTable;
use crate::core::sync::{SyncEngine, SyncOptions};
use crate::error::{OpkError, Result};
use crate::packages::{ManagerRegistry, PmSelection};
use crate::project_identity;
use crate::state::lock::{self, ProjectLock};
use crate::utils::paths;
use std::path::{Path, PathBuf};

/// Everything a command needs, built once per process
pub struct Context<'a> {
    pub registry: &'a ManagerRegistry,
    pub flags: &'a FlagTable,
    pub runner: &'a dyn CommandRunner,
    pub project_dir: PathBuf,
    pub sync_options: SyncOptions,
}

impl<'a> Context<'a> {
    pub fn config_path(&self) -> PathBuf {
        paths::project_files(&self.project_dir).0
    }

    pub fn manifest_path(&self) -> PathBuf {
        paths::project_files(&self.project_dir).1
    }

    pub fn has_config(&self) -> bool {
        self.config_path().is_file()
    }

    /// Resolve a user-supplied path against the project directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    pub fn loader(&self) -> ConfigLoader<'a> {
        ConfigLoader::new(self.registry)
    }

    pub fn sync_engine(&self) -> SyncEngine<'a> {
        SyncEngine::new(self.registry, self.runner, self.sync_options)
    }

    pub fn lock(&self) -> Result<ProjectLock> {
        lock::acquire(&self.project_dir)
    }

    /// The active manager: package.kdl when present, lockfiles otherwise.
    /// The loaded config is returned alongside so it is read only once.
    pub fn select_manager(&self) -> Result<(PmSelection, Option<PackageConfig>)> {
        if self.has_config() {
            let config = self.loader().load(&self.config_path())?;
            return Ok((PmSelection::from_config(config.pm), Some(config)));
        }
        Ok((self.registry.detect_from_lockfiles(&self.project_dir), None))
    }

    /// Fail when package.kdl is missing, naming the way to create one
    pub fn require_config(&self, verb: &str) -> Result<PathBuf> {
        let path = self.config_path();
        if path.is_file() {
            return Ok(path);
        }
        Err(OpkError::UserConfigError(format!(
            "'{}' needs {} in {}. Create one with '{}' or '{}'",
            project_identity::cli_with(verb),
            project_identity::CONFIG_FILE_BASENAME,
            self.project_dir.display(),
            project_identity::cli_with("init"),
            project_identity::cli_with("migrate"),
        )))
    }
}
