use crate::error::{OpkError, Result};
use crate::project_identity;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Where opk keeps per-user state: `$OPK_STATE_DIR`, else the platform
/// data directory
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(project_identity::env_key("STATE_DIR"))
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    let proj = ProjectDirs::from("dev", "opk", project_identity::BINARY_NAME).ok_or_else(|| {
        OpkError::UserConfigError("Could not determine a home directory for opk state".to_string())
    })?;
    Ok(proj.data_dir().to_path_buf())
}

pub fn version_marker() -> Result<PathBuf> {
    Ok(state_dir()?.join(project_identity::VERSION_MARKER_BASENAME))
}

/// package.kdl and package.json inside `project_dir`
pub fn project_files(project_dir: &Path) -> (PathBuf, PathBuf) {
    (
        project_dir.join(project_identity::CONFIG_FILE_BASENAME),
        project_dir.join(project_identity::MANIFEST_FILE_BASENAME),
    )
}
