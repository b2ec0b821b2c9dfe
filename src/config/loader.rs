//! Isolated config loading
//!
//! Each load copies package.kdl into a uniquely named scratch file next to
//! it, parses the copy, and drops the copy on every exit path. The original
//! file is only ever read through the copy, and no parsed state survives
//! between loads, so a reload after an edit always sees the new content.

use crate::config::kdl::parse_package_config;
use crate::config::types::PackageConfig;
use crate::error::{OpkError, Result};
use crate::packages::ManagerRegistry;
use crate::project_identity;
use crate::ui;
use std::fs;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

pub struct ConfigLoader<'a> {
    registry: &'a ManagerRegistry,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(registry: &'a ManagerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a ManagerRegistry {
        self.registry
    }

    pub fn load(&self, path: &Path) -> Result<PackageConfig> {
        if !path.is_file() {
            return Err(OpkError::UserConfigError(format!(
                "{} not found. Create one with '{}' or '{}'",
                path.display(),
                project_identity::cli_with("init"),
                project_identity::cli_with("migrate"),
            )));
        }

        let scratch = ScratchCopy::create(path)?;
        let content = fs::read_to_string(scratch.path()).map_err(|e| OpkError::io(scratch.path(), e))?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        parse_package_config(&content, &label, self.registry)
    }
}

/// Exclusively owned duplicate of a file, deleted when dropped
struct ScratchCopy {
    file: NamedTempFile,
}

impl ScratchCopy {
    fn create(original: &Path) -> Result<Self> {
        let dir = match original.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let stem = original
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string());
        let suffix = original
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let file = Builder::new()
            .prefix(&format!(".{}.opk-", stem))
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| OpkError::io(dir, e))?;

        fs::copy(original, file.path()).map_err(|e| OpkError::io(original, e))?;
        ui::debug(&format!("loading {} via {}", original.display(), file.path().display()));

        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }
}
