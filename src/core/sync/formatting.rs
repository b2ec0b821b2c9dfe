//! Optional kdlfmt pass over package.kdl

use crate::core::command_exec::{CommandRunner, Invocation, run_checked};
use crate::error::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const FORMATTER: &str = "kdlfmt";

/// `kdlfmt` as a whole word, so `my-kdlfmt-wrapper` does not count
static MENTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(^|[^A-Za-z0-9_-])kdlfmt($|[^A-Za-z0-9_-])").ok());

fn mentions_formatter(text: &str) -> bool {
    match MENTION.as_ref() {
        Some(re) => re.is_match(text),
        None => text.contains(FORMATTER),
    }
}

/// True when the project opts into kdlfmt, through a script or a
/// formatter config file in its root
pub fn project_uses_formatter(project_dir: &Path, scripts: &BTreeMap<String, String>) -> bool {
    if scripts
        .iter()
        .any(|(name, command)| mentions_formatter(name) || mentions_formatter(command))
    {
        return true;
    }

    let Ok(entries) = fs::read_dir(project_dir) else {
        return false;
    };
    entries.filter_map(|e| e.ok()).any(|entry| {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        name.starts_with(".kdlfmt") || name.starts_with("kdlfmt.")
    })
}

/// `kdlfmt format <config>`
pub fn format_config(runner: &dyn CommandRunner, config_path: &Path, project_dir: &Path) -> Result<()> {
    let invocation = Invocation::from_template(
        FORMATTER,
        ["format".to_string(), config_path.display().to_string()],
        project_dir,
    )?;
    run_checked(runner, &invocation)
}
