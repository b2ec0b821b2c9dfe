pub mod editor;
pub mod error_reporter;
pub mod kdl;
pub mod loader;
pub mod render;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    DependencyKind, DependencyMap, DependencySet, ModuleType, PackageConfig, ProjectMetadata,
};
