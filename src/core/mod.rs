pub mod command_exec;
pub mod flags;
pub mod sync;
pub mod types;
