use super::Context;
use crate::error::{OpkError, Result};
use crate::manifest::ManifestSummary;
use crate::ui::list::print_list;

/// `opk list [manifestPath]`
pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    let path = match args {
        [] => ctx.manifest_path(),
        [path] => ctx.resolve(path),
        _ => {
            return Err(OpkError::UserConfigError(
                "'opk list' takes at most one manifest path".to_string(),
            ));
        }
    };

    if !path.is_file() {
        return Err(OpkError::UserConfigError(format!(
            "{} not found",
            path.display()
        )));
    }

    print_list(&ManifestSummary::read(&path)?);
    Ok(())
}
