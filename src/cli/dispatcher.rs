//! Command router
//!
//! One verb per process run. The verb decides which command module runs;
//! manager selection, flag normalization and syncing happen inside them.

use crate::commands::{self, Context};
use crate::core::types::Verb;
use crate::error::{OpkError, Result};
use crate::project_identity;
use crate::ui;

pub fn dispatch(ctx: &Context, words: &[String]) -> Result<()> {
    // Bare `opk` regenerates the manifest
    let Some((first, rest)) = words.split_first() else {
        return commands::generate::run(ctx, &[]);
    };
    let verb: Verb = first.parse().map_err(OpkError::UnknownCommand)?;
    ui::debug(&format!("{:?} in {}", verb, ctx.project_dir.display()));

    match verb {
        Verb::Help => {
            ui::help::print_help(ctx.flags);
            Ok(())
        }
        Verb::Init => {
            no_arguments(first, rest)?;
            commands::init::run(ctx)
        }
        Verb::Migrate => {
            no_arguments(first, rest)?;
            commands::migrate::run(ctx)
        }
        Verb::List => commands::list::run(ctx, rest),
        Verb::Info => commands::info::run(ctx, rest),
        Verb::Sync => commands::sync::run(ctx, rest),
        Verb::Generate => commands::generate::run(ctx, rest),
        Verb::Manager(manager_verb) => commands::pm::run(ctx, manager_verb, rest),
    }
}

fn no_arguments(verb: &str, rest: &[String]) -> Result<()> {
    if rest.is_empty() {
        return Ok(());
    }
    Err(OpkError::UserConfigError(format!(
        "'{}' takes no arguments (got '{}')",
        project_identity::cli_with(verb),
        rest.join(" ")
    )))
}
