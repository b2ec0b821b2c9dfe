//! `opk info [name]`
//!
//! With a package name, prints the registry's view of its latest release.
//! Without one, prints a summary of the current project.

mod project;
mod registry;

use super::Context;
use crate::error::Result;

pub use registry::{PackageDocument, fetch_package, render_package};

pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    match args.first() {
        Some(name) => {
            let document = fetch_package(name)?;
            print!("{}", render_package(&document)?);
            Ok(())
        }
        None => project::run(ctx),
    }
}
