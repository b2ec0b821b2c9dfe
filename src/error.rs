use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpkError {
    /// Config source is missing, incomplete, or already present when it should not be
    #[error("{0}")]
    UserConfigError(String),

    /// Flag not applicable to the verb, conflicting flags, or unsupported by the manager
    #[error("{0}")]
    FlagError(String),

    /// Mutating verb called without any target
    #[error("{0}")]
    MissingArgumentError(String),

    /// External command exited with a non-zero status
    #[error("'{command}' exited with status {code}")]
    ProcessError { command: String, code: i32 },

    #[error("Unknown command: {0}. Run 'opk help' for the list of commands")]
    UnknownCommand(String),

    #[error("Unknown package manager '{0}'. Known managers: bun, npm, pnpm, yarn, deno")]
    UnknownManager(String),

    #[error("'{command}' is not supported by {manager}")]
    UnsupportedCommand { manager: String, command: String },

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// Lock acquisition failed (another opk process owns the project)
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    /// Registry fetch error (HTTP, network, etc.)
    #[error("Failed to fetch remote resource: {0}")]
    RemoteFetchError(String),
}

impl OpkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OpkError::IoError {
            path: path.into(),
            source,
        }
    }

    /// Exit status for this error: the child's own status for a failed
    /// manager command, 1 for everything detected by opk itself.
    pub fn exit_code(&self) -> i32 {
        match self {
            OpkError::ProcessError { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, OpkError>;

#[cfg(test)]
mod tests {
    use super::OpkError;

    #[test]
    fn process_error_keeps_child_exit_code() {
        let err = OpkError::ProcessError {
            command: "npm install".into(),
            code: 42,
        };
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn internal_errors_exit_with_one() {
        assert_eq!(OpkError::FlagError("bad".into()).exit_code(), 1);
        assert_eq!(OpkError::UnknownCommand("frob".into()).exit_code(), 1);
        assert_eq!(
            OpkError::MissingArgumentError("missing".into()).exit_code(),
            1
        );
    }

    #[test]
    fn diagnostics_render_on_one_line() {
        let err = OpkError::UnsupportedCommand {
            manager: "deno".into(),
            command: "audit".into(),
        };
        assert!(!err.to_string().contains('\n'));
    }
}
