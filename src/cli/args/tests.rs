use super::{Cli, one_line_error};
use crate::project_identity;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once(project_identity::BINARY_NAME).chain(args.iter().copied());
    Cli::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn global_flags_before_the_command_are_parsed() {
    let cli = parse(&["--quiet", "--no-format", "-C", "/tmp/project", "install"]);
    assert!(cli.global.quiet);
    assert!(cli.global.no_format);
    assert_eq!(
        cli.global.directory.as_deref(),
        Some(std::path::Path::new("/tmp/project"))
    );
    assert_eq!(cli.command, vec!["install"]);
}

#[test]
fn manager_flags_and_separator_are_kept_verbatim() {
    let cli = parse(&["add", "--dev", "react", "--", "--quiet", "x"]);
    assert!(!cli.global.quiet);
    assert_eq!(cli.command, vec!["add", "--dev", "react", "--", "--quiet", "x"]);
}

#[test]
fn help_spellings_reach_the_router() {
    assert_eq!(parse(&["--help"]).command, vec!["--help"]);
    assert_eq!(parse(&["-h"]).command, vec!["-h"]);
}

#[test]
fn no_command_is_allowed() {
    let cli = parse(&["--debug"]);
    assert!(cli.global.debug);
    assert!(cli.command.is_empty());
}

#[test]
fn version_flag_is_handled_by_clap() {
    let err = Cli::try_parse_from([project_identity::BINARY_NAME, "--version"])
        .expect_err("version short-circuits");
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn missing_directory_value_is_one_line() {
    let err = Cli::try_parse_from([project_identity::BINARY_NAME, "-C"])
        .expect_err("-C needs a value");
    let line = one_line_error(&err);
    assert!(line.contains("-C"), "{}", line);
    assert!(!line.contains('\n'));
    assert!(!line.starts_with("error"));
    assert!(!line.contains("Usage"));
}
