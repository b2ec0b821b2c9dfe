//! # Package Manager Descriptors
//!
//! opk never installs anything itself. Each supported manager is described
//! by a [`ManagerDescriptor`]: the command templates for the verbs opk
//! routes, and how the manager spells each shared flag.
//!
//! - `builtin.rs`: the descriptor table for bun, npm, pnpm, yarn and deno
//! - `registry.rs`: lookup by name and lockfile-based inference

pub mod builtin;
pub mod descriptor;
pub mod registry;

pub use descriptor::{IgnoreFlags, LockFlags, ManagerDescriptor, OutputFlags, ScopeFlags};
pub use registry::{LOCKFILE_PRIORITY, ManagerRegistry, PmSelection, PmSource};
