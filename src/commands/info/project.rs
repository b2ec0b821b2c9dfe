use crate::commands::Context;
use crate::config::types::DependencyKind;
use crate::error::{OpkError, Result};
use crate::manifest::ManifestSummary;
use crate::project_identity;
use crate::ui;
use colored::Colorize;

/// Project summary, from package.kdl when present, else package.json
pub fn run(ctx: &Context) -> Result<()> {
    let (selection, config) = ctx.select_manager()?;

    let summary = match &config {
        Some(config) => ManifestSummary {
            name: config.metadata.name.clone(),
            version: config.metadata.version.clone(),
            description: config.metadata.description.clone(),
            script_count: config.scripts.len(),
            dependencies: config.dependencies.clone(),
        },
        None => {
            let manifest_path = ctx.manifest_path();
            if !manifest_path.is_file() {
                return Err(OpkError::UserConfigError(format!(
                    "Neither {} nor {} found in {}",
                    project_identity::CONFIG_FILE_BASENAME,
                    project_identity::MANIFEST_FILE_BASENAME,
                    ctx.project_dir.display()
                )));
            }
            ManifestSummary::read(&manifest_path)?
        }
    };

    let title = match (&summary.name, &summary.version) {
        (Some(name), Some(version)) => format!("{}@{}", name, version),
        (Some(name), None) => name.clone(),
        _ => "unnamed-project".to_string(),
    };
    println!("{}", title.magenta().bold());
    if let Some(description) = summary.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", description);
    }
    println!();

    ui::keyval("package manager", &format!("{} ({})", selection.manager.name, selection.source));
    if let Some(config) = &config
        && !config.alt_pms.is_empty()
    {
        let names: Vec<&str> = config.alt_pms.iter().map(|d| d.name).collect();
        ui::keyval("kept in sync", &names.join(", "));
    }
    ui::keyval(
        "source",
        if config.is_some() {
            project_identity::CONFIG_FILE_BASENAME
        } else {
            project_identity::MANIFEST_FILE_BASENAME
        },
    );
    ui::keyval("scripts", &summary.script_count.to_string());
    for kind in DependencyKind::ALL {
        let count = summary.dependencies.count(kind);
        if count > 0 {
            ui::keyval(kind.manifest_key(), &count.to_string());
        }
    }
    Ok(())
}
