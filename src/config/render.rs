//! package.kdl writer
//!
//! Produces the canonical layout used by `opk init` and `opk migrate`:
//! manager selection first, then metadata, scripts and dependency blocks.

use crate::config::kdl::quote;
use crate::config::types::{DependencyKind, DependencyMap, PackageConfig};
use std::collections::BTreeMap;
use std::fmt::Write;

pub fn render_config(config: &PackageConfig) -> String {
    let mut out = String::new();
    let meta = &config.metadata;

    let _ = writeln!(out, "pm {}", quote(config.pm.name));
    if !config.alt_pms.is_empty() {
        let names: Vec<String> = config.alt_pms.iter().map(|d| quote(d.name)).collect();
        let _ = writeln!(out, "alt-pms {}", names.join(" "));
    }
    out.push('\n');

    let scalars = [
        ("name", meta.name.as_deref()),
        ("version", meta.version.as_deref()),
        ("description", meta.description.as_deref()),
        ("license", meta.license.as_deref()),
        ("main", meta.main.as_deref()),
        ("module", meta.module.as_deref()),
        ("homepage", meta.homepage.as_deref()),
        ("repository", meta.repository.as_deref()),
    ];
    for (key, value) in scalars {
        if let Some(value) = value {
            let _ = writeln!(out, "{} {}", key, quote(value));
        }
    }
    if let Some(module_type) = meta.module_type {
        let _ = writeln!(out, "type {}", quote(&module_type.to_string()));
    }
    if let Some(private) = meta.private {
        let _ = writeln!(out, "private {}", if private { "#true" } else { "#false" });
    }
    write_list(&mut out, "keywords", &meta.keywords);
    write_list(&mut out, "files", &meta.files);
    write_block(&mut out, "bin", &meta.bin);
    write_block(&mut out, "scripts", &config.scripts);

    for (kind, map) in config.dependencies.iter() {
        out.push_str(&render_dependency_section(kind, map));
    }

    out
}

/// A single dependency block, terminated by a newline
pub fn render_dependency_section(kind: DependencyKind, map: &DependencyMap) -> String {
    let mut out = String::new();
    write_block(&mut out, kind.kdl_name(), map);
    out
}

fn write_list(out: &mut String, key: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    let _ = writeln!(out, "{} {}", key, quoted.join(" "));
}

fn write_block(out: &mut String, key: &str, map: &BTreeMap<String, String>) {
    if map.is_empty() {
        return;
    }
    let _ = writeln!(out, "{} {{", key);
    for (name, value) in map {
        let _ = writeln!(out, "    {} {}", quote(name), quote(value));
    }
    out.push_str("}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::kdl::parse_package_config;
    use crate::config::types::ModuleType;
    use crate::packages::ManagerRegistry;
    use crate::packages::builtin::{BUN, NPM};

    #[test]
    fn rendered_config_parses_back() {
        let mut config = PackageConfig::new(BUN);
        config.alt_pms.push(NPM);
        config.metadata.name = Some("demo \"quoted\"".into());
        config.metadata.module_type = Some(ModuleType::CommonJs);
        config.metadata.private = Some(false);
        config.metadata.keywords = vec!["a".into(), "b".into()];
        config.metadata.bin.insert("demo".into(), "./cli.js".into());
        config.scripts.insert("build".into(), "tsc".into());
        config
            .dependencies
            .insert(DependencyKind::Dependencies, "@scope/pkg", "^1.0.0");
        config
            .dependencies
            .insert(DependencyKind::DevDependencies, "true", "*");

        let rendered = render_config(&config);
        let parsed = parse_package_config(&rendered, "package.kdl", &ManagerRegistry::new())
            .expect("rendered config is valid");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let rendered = render_config(&PackageConfig::new(BUN));
        assert_eq!(rendered, "pm \"bun\"\n\n");
    }
}
