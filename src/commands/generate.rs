use super::Context;
use super::sync::target_paths;
use crate::error::Result;

/// `opk generate [configPath] [manifestPath]`: manifest only, no dependency
/// import, formatter or alternate managers
pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    let (config_path, manifest_path) = target_paths(ctx, "generate", args)?;
    let _lock = ctx.lock()?;
    ctx.sync_engine().generate(&config_path, &manifest_path)?;
    Ok(())
}
