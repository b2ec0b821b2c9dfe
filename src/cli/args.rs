use crate::project_identity;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Global flags come before the command; everything from the command on is
/// kept verbatim so manager flags and `--` reach the flag normalizer.
#[derive(Parser, Debug)]
#[command(
    name = project_identity::BINARY_NAME,
    about = project_identity::DESCRIPTION,
    version,
    disable_help_flag = true,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    /// Command followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalFlags {
    /// Only print warnings and errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print every command before it runs
    #[arg(long)]
    pub debug: bool,

    /// Skip the kdlfmt pass during sync
    #[arg(long)]
    pub no_format: bool,

    /// Print the release notes of this version
    #[arg(long)]
    pub whats_new: bool,

    /// Run as if started in DIR
    #[arg(short = 'C', value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

/// Single-line form of a command-line error, without clap's usage block
pub fn one_line_error(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("invalid arguments");
    line.strip_prefix("error:").unwrap_or(line).trim().to_string()
}

#[cfg(test)]
mod tests;
