use super::Context;
use crate::config::render::render_config;
use crate::core::sync::formatting;
use crate::error::{OpkError, Result};
use crate::manifest;
use crate::project_identity;
use crate::ui;
use crate::utils::atomic::write_atomic;
use colored::Colorize;

/// `opk migrate`: turn an existing package.json into package.kdl. The
/// manager comes from the project's lockfiles.
pub fn run(ctx: &Context) -> Result<()> {
    let config_path = ctx.config_path();
    let manifest_path = ctx.manifest_path();

    if config_path.exists() {
        return Err(OpkError::UserConfigError(format!(
            "{} already exists",
            config_path.display()
        )));
    }
    if !manifest_path.is_file() {
        return Err(OpkError::UserConfigError(format!(
            "{} not found. Use '{}' to start a new project",
            manifest_path.display(),
            project_identity::cli_with("init")
        )));
    }

    let object = manifest::read_object(&manifest_path)?;
    let selection = ctx.registry.detect_from_lockfiles(&ctx.project_dir);
    let imported = manifest::config_from_manifest(&object, selection.manager);

    for field in &imported.skipped {
        ui::warning(&format!(
            "'{}' from {} has no place in {} and was left out",
            field,
            project_identity::MANIFEST_FILE_BASENAME,
            project_identity::CONFIG_FILE_BASENAME
        ));
    }

    write_atomic(&config_path, &render_config(&imported.config))?;

    if ctx.sync_options.format
        && formatting::project_uses_formatter(&ctx.project_dir, &imported.config.scripts)
        && let Err(e) = formatting::format_config(ctx.runner, &config_path, &ctx.project_dir)
    {
        ui::warning(&format!("{} failed: {}", formatting::FORMATTER, e));
    }

    ui::success(&format!(
        "Migrated {} to {} using {} ({})",
        project_identity::MANIFEST_FILE_BASENAME,
        project_identity::CONFIG_FILE_BASENAME,
        selection.manager.name.purple(),
        selection.source
    ));
    Ok(())
}
