//! External command execution
//!
//! Every child runs with inherited stdin/stdout/stderr and the caller blocks
//! until it exits, so prompts and progress bars of the wrapped manager keep
//! working and only one child is ever in flight.

use crate::error::{OpkError, Result};
use crate::ui;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// A fully resolved command line plus the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// Build from a manager template such as `"npm uninstall"` followed by
    /// `extra` arguments.
    pub fn from_template<I>(template: &str, extra: I, cwd: &Path) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parts = shlex::split(template)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| OpkError::SystemCommandFailed {
                command: template.to_string(),
                reason: "invalid command template".to_string(),
            })?
            .into_iter();

        let program = parts.next().ok_or_else(|| OpkError::SystemCommandFailed {
            command: template.to_string(),
            reason: "empty command template".to_string(),
        })?;

        let mut args: Vec<String> = parts.collect();
        args.extend(extra);

        Ok(Self {
            program,
            args,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Shell-quoted rendering for diagnostics
    pub fn display(&self) -> String {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words).unwrap_or_else(|_| {
            let mut line = self.program.clone();
            for arg in &self.args {
                line.push(' ');
                line.push_str(arg);
            }
            line
        })
    }
}

/// Seam between opk and the processes it spawns
pub trait CommandRunner {
    /// Run to completion and return the exit code
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}

/// Run and turn a non-zero exit into `ProcessError`
pub fn run_checked(runner: &dyn CommandRunner, invocation: &Invocation) -> Result<()> {
    let code = runner.run(invocation)?;
    if code != 0 {
        return Err(OpkError::ProcessError {
            command: invocation.display(),
            code,
        });
    }
    Ok(())
}

/// Spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        let cmd_debug = invocation.display();

        let program = which::which(&invocation.program).map_err(|_| {
            OpkError::SystemCommandFailed {
                command: cmd_debug.clone(),
                reason: format!("'{}' was not found on PATH", invocation.program),
            }
        })?;

        ui::debug(&format!("$ {}", cmd_debug));

        let status = Command::new(program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| OpkError::SystemCommandFailed {
                command: cmd_debug,
                reason: e.to_string(),
            })?;

        Ok(exit_code(status))
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
pub(crate) mod recording;
