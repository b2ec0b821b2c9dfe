use super::Context;
use crate::config::render::render_config;
use crate::config::types::{ModuleType, PackageConfig};
use crate::error::{OpkError, Result};
use crate::project_identity;
use crate::ui;
use crate::utils::atomic::write_atomic;
use colored::Colorize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAnswers {
    pub name: String,
    pub description: String,
    pub license: String,
    pub module_type: ModuleType,
}

/// `opk init`: ask a few questions, write package.kdl, generate package.json
pub fn run(ctx: &Context) -> Result<()> {
    let config_path = ctx.config_path();
    if config_path.exists() {
        return Err(OpkError::UserConfigError(format!(
            "{} already exists",
            config_path.display()
        )));
    }
    let manifest_path = ctx.manifest_path();
    if manifest_path.exists() {
        return Err(OpkError::UserConfigError(format!(
            "{} already exists. Use '{}' to import it",
            manifest_path.display(),
            project_identity::cli_with("migrate")
        )));
    }

    let default_name = ctx
        .project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "my-project".to_string());
    let answers = prompt(&default_name);

    let selection = ctx.registry.detect_from_lockfiles(&ctx.project_dir);
    let config = initial_config(selection.manager, &answers);

    write_atomic(&config_path, &render_config(&config))?;
    ui::success(&format!(
        "Initialized {} with {}",
        project_identity::CONFIG_FILE_BASENAME,
        selection.manager.name.purple()
    ));

    ctx.sync_engine().generate(&config_path, &manifest_path)?;

    if !ui::is_quiet() {
        println!(
            "\nRun {} to install dependencies",
            project_identity::cli_with("install").purple()
        );
        println!(
            "Or edit pm in {} to use a different manager",
            project_identity::CONFIG_FILE_BASENAME.purple()
        );
    }
    Ok(())
}

fn prompt(default_name: &str) -> InitAnswers {
    let name = ui::prompt_line("Package name", default_name);
    let description = ui::prompt_line("Description", "");
    let license = ui::prompt_line("License", "MIT");
    let module_type = ui::prompt_line("Module type (module/commonjs)", "module");

    InitAnswers {
        name,
        description,
        license,
        module_type: parse_module_type(&module_type),
    }
}

/// Anything but "commonjs" means an ES module project
fn parse_module_type(raw: &str) -> ModuleType {
    if raw.trim().eq_ignore_ascii_case("commonjs") {
        ModuleType::CommonJs
    } else {
        ModuleType::Module
    }
}

pub fn initial_config(
    pm: crate::packages::ManagerDescriptor,
    answers: &InitAnswers,
) -> PackageConfig {
    let mut config = PackageConfig::new(pm);
    let meta = &mut config.metadata;
    meta.name = Some(answers.name.clone());
    meta.description = Some(answers.description.clone()).filter(|d| !d.is_empty());
    meta.license = Some(answers.license.clone()).filter(|l| !l.is_empty());
    meta.module_type = Some(answers.module_type);
    meta.private = Some(false);
    config
}
