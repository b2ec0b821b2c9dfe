//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values
//! and the well-known file names opk reads and writes in a project.

pub const DISPLAY_NAME: &str = "Opk";
pub const BINARY_NAME: &str = "opk";
pub const EXEC_BINARY_NAME: &str = "opx";
pub const ENV_PREFIX: &str = "OPK";
pub const DESCRIPTION: &str = "The universal package manager for JS/TS.";

/// Structured source of truth, relative to the project root
pub const CONFIG_FILE_BASENAME: &str = "package.kdl";
/// Generated manifest, relative to the project root
pub const MANIFEST_FILE_BASENAME: &str = "package.json";
/// Per-project lock held while opk drives a package manager
pub const PROJECT_LOCK_BASENAME: &str = ".opk.lock";
/// Single-line version marker inside the state dir
pub const VERSION_MARKER_BASENAME: &str = "last-installed-version";

pub const REGISTRY_BASE_URL: &str = "https://registry.npmjs.org";

pub const WHATS_NEW: &str = "\
In Opk 0.4.1, you can now run the opk info command on your current project directory!
This allows for a quick overview of your project's metadata and deps.
This update also includes release notes, like these, being printed on first run of a new version.";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn cli_with(args: &str) -> String {
    format!("{} {}", BINARY_NAME, args)
}

pub fn current_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
