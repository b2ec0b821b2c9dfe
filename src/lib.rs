pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod manifest;
pub mod packages;
pub mod project_identity;
pub mod state;
pub mod ui;
pub mod utils;

use clap::Parser;
use clap::error::ErrorKind;
use crate::cli::Cli;
use crate::commands::Context;
use crate::core::command_exec::SystemRunner;
use crate::core::flags::FlagTable;
use crate::core::sync::SyncOptions;
use crate::error::{OpkError, Result};
use crate::packages::ManagerRegistry;
use std::ffi::OsString;
use std::process::exit;

/// Run the opk CLI entrypoint.
pub fn run_cli() {
    run_with_args(std::env::args_os().collect());
}

/// `opx <args>` is `opk exec <args>`
pub fn run_opx() {
    let mut argv: Vec<OsString> = std::env::args_os().collect();
    let insert_at = argv.len().min(1);
    argv.insert(insert_at, OsString::from("exec"));
    run_with_args(argv);
}

fn run_with_args(argv: Vec<OsString>) {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling: the child gets the same SIGINT and reports its own status
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    }) {
        ui::debug(&format!("could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = match Cli::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            ui::error(&cli::args::one_line_error(&e));
            exit(1);
        }
    };
    ui::set_quiet(args.global.quiet);
    ui::set_debug(args.global.debug);

    if let Err(e) = run(&args) {
        ui::error(&format!("{}", e));
        // Conventional status for SIGINT when the child did not report one
        let code = match e {
            OpkError::ProcessError { .. } => e.exit_code(),
            _ if ui::was_interrupted() => 130,
            _ => e.exit_code(),
        };
        exit(code);
    }
}

fn run(args: &Cli) -> Result<()> {
    let project_dir = match &args.global.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    if !project_dir.is_dir() {
        return Err(OpkError::UserConfigError(format!(
            "{} is not a directory",
            project_dir.display()
        )));
    }

    state::marker::announce_if_new(args.global.whats_new);

    let registry = ManagerRegistry::new();
    let flags = FlagTable::builtin();
    let runner = SystemRunner;
    let mut sync_options = SyncOptions::from_env();
    if args.global.no_format {
        sync_options.format = false;
    }

    let ctx = Context {
        registry: &registry,
        flags: &flags,
        runner: &runner,
        project_dir,
        sync_options,
    };
    cli::dispatcher::dispatch(&ctx, &args.command)
}
