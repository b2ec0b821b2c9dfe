//! Manager-backed verbs: add, remove, install, update, audit, run, exec

use super::Context;
use crate::core::command_exec::{Invocation, run_checked};
use crate::core::flags::{self, missing_target};
use crate::core::types::ManagerVerb;
use crate::error::{OpkError, Result};
use crate::packages::PmSelection;
use crate::project_identity;
use crate::ui;

pub fn run(ctx: &Context, verb: ManagerVerb, args: &[String]) -> Result<()> {
    let (selection, config) = ctx.select_manager()?;
    if selection.is_inferred() {
        announce_inference(&selection);
    }
    let manager = selection.manager;

    let template = manager.template_for(verb);
    if template.trim().is_empty() {
        return Err(OpkError::UnsupportedCommand {
            manager: manager.name.to_string(),
            command: verb.to_string(),
        });
    }

    // Everything below may spawn processes; all argument errors are raised here
    let extra = if verb.normalizes_flags() {
        flags::normalize(ctx.flags, verb, args, &manager)?.into_args()
    } else {
        if args.is_empty() {
            return Err(missing_target(verb));
        }
        args.to_vec()
    };
    let invocation = Invocation::from_template(template, extra, &ctx.project_dir)?;

    if matches!(verb, ManagerVerb::Run | ManagerVerb::Exec) {
        return run_checked(ctx.runner, &invocation);
    }

    let _lock = ctx.lock()?;

    // Inference mode and audit never touch the project files
    if config.is_none() || !verb.mutates() {
        return run_checked(ctx.runner, &invocation);
    }
    let config_path = ctx.config_path();
    let manifest_path = ctx.manifest_path();
    let engine = ctx.sync_engine();

    // The manager must read the manifest package.kdl describes
    let baseline = engine.prepare(&config_path, &manifest_path)?;

    run_checked(ctx.runner, &invocation)?;

    let report = engine.sync(&config_path, &manifest_path, Some(&baseline))?;
    if report.config_changes > 0 {
        ui::success(&format!(
            "Updated {} ({} change{})",
            project_identity::CONFIG_FILE_BASENAME,
            report.config_changes,
            if report.config_changes == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}

fn announce_inference(selection: &PmSelection) {
    ui::info(&format!(
        "No {} here, using {} ({}). Create one with '{}'",
        project_identity::CONFIG_FILE_BASENAME,
        selection.manager.name,
        selection.source,
        project_identity::cli_with("migrate")
    ));
}
