use super::Context;
use crate::error::{OpkError, Result};
use crate::ui;
use std::path::PathBuf;

/// `opk sync [configPath] [manifestPath]`
pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    let (config_path, manifest_path) = target_paths(ctx, "sync", args)?;
    let _lock = ctx.lock()?;

    let report = ctx
        .sync_engine()
        .sync(&config_path, &manifest_path, None)?;

    if report.config_changes > 0 {
        ui::info(&format!(
            "Imported {} dependenc{} from {}",
            report.config_changes,
            if report.config_changes == 1 { "y" } else { "ies" },
            manifest_path.display()
        ));
    }
    ui::success("Project is in sync");
    Ok(())
}

/// Optional config and manifest paths shared by `sync` and `generate`
pub(super) fn target_paths(
    ctx: &Context,
    verb: &str,
    args: &[String],
) -> Result<(PathBuf, PathBuf)> {
    if args.len() > 2 {
        return Err(OpkError::UserConfigError(format!(
            "'{} {}' takes at most a config path and a manifest path",
            crate::project_identity::BINARY_NAME,
            verb
        )));
    }

    let config_path = match args.first() {
        Some(path) => {
            let path = ctx.resolve(path);
            if !path.is_file() {
                return Err(OpkError::UserConfigError(format!(
                    "{} not found",
                    path.display()
                )));
            }
            path
        }
        None => ctx.require_config(verb)?,
    };
    let manifest_path = match args.get(1) {
        Some(path) => ctx.resolve(path),
        None => ctx.manifest_path(),
    };

    Ok((config_path, manifest_path))
}
