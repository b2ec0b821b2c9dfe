//! package.kdl parser
//!
//! The config is plain KDL data checked against a fixed schema; nothing in
//! it is evaluated. Every top-level node may appear at most once:
//!
//! ```kdl
//! pm "bun"
//! alt-pms "npm" "pnpm"
//! name "my-project"
//! version "1.0.0"
//! type "module"
//! private #false
//! keywords "cli" "tools"
//! bin { opk "./dist/cli.js" }
//! scripts { build "bun run build.ts" }
//! dependencies { "@scope/pkg" "^0.5.0" }
//! dev-dependencies { typescript "^5" }
//! ```

use crate::config::error_reporter;
use crate::config::types::{DependencyKind, DependencySet, PackageConfig, ProjectMetadata};
use crate::error::{OpkError, Result};
use crate::packages::{ManagerDescriptor, ManagerRegistry};
use kdl::{KdlDocument, KdlError, KdlNode};
use std::collections::{BTreeMap, HashSet};

/// Parse a KDL document, reporting syntax errors on one line
pub fn parse_document(content: &str, file: &str) -> Result<KdlDocument> {
    content.parse().map_err(|e: KdlError| OpkError::ParseError {
        file: file.to_string(),
        message: error_reporter::format_error_report(content, &e),
    })
}

/// Parse and validate package.kdl content. `file` is only used in messages.
pub fn parse_package_config(
    content: &str,
    file: &str,
    registry: &ManagerRegistry,
) -> Result<PackageConfig> {
    let doc = parse_document(content, file)?;

    let mut seen = HashSet::new();
    let mut pm_name: Option<String> = None;
    let mut alt_names: Vec<String> = Vec::new();
    let mut metadata = ProjectMetadata::default();
    let mut scripts = BTreeMap::new();
    let mut dependencies = DependencySet::default();

    for node in doc.nodes() {
        let name = node.name().value();
        if !seen.insert(name.to_string()) {
            return Err(schema_error(file, format!("'{}' is declared more than once", name)));
        }

        match name {
            "pm" => pm_name = Some(single_string(node, file)?),
            "alt-pms" => alt_names = string_args(node, file)?,
            "name" => metadata.name = Some(single_string(node, file)?),
            "version" => metadata.version = Some(single_string(node, file)?),
            "description" => metadata.description = Some(single_string(node, file)?),
            "license" => metadata.license = Some(single_string(node, file)?),
            "main" => metadata.main = Some(single_string(node, file)?),
            "module" => metadata.module = Some(single_string(node, file)?),
            "homepage" => metadata.homepage = Some(single_string(node, file)?),
            "repository" => metadata.repository = Some(single_string(node, file)?),
            "type" => {
                let raw = single_string(node, file)?;
                metadata.module_type = Some(raw.parse().map_err(|e| schema_error(file, e))?);
            }
            "private" => metadata.private = Some(single_bool(node, file)?),
            "keywords" => metadata.keywords = string_args(node, file)?,
            "files" => metadata.files = string_args(node, file)?,
            "bin" => metadata.bin = string_map(node, file)?,
            "scripts" => scripts = string_map(node, file)?,
            other => match DependencyKind::from_kdl_name(other) {
                Some(kind) => dependencies.set_map(kind, string_map(node, file)?),
                None => {
                    return Err(schema_error(file, format!("unknown field '{}'", other)));
                }
            },
        }
    }

    let pm_name = pm_name.ok_or_else(|| {
        OpkError::UserConfigError(format!(
            "Missing required pm field in {}. Assign a package manager to pm, e.g. pm \"{}\"",
            file,
            registry.default_manager().name
        ))
    })?;
    let pm = *registry.describe(&pm_name)?;
    let alt_pms = resolve_alt_pms(&pm, &alt_names, file, registry)?;

    Ok(PackageConfig {
        pm,
        alt_pms,
        metadata,
        scripts,
        dependencies,
    })
}

fn resolve_alt_pms(
    pm: &ManagerDescriptor,
    names: &[String],
    file: &str,
    registry: &ManagerRegistry,
) -> Result<Vec<ManagerDescriptor>> {
    let mut alt_pms: Vec<ManagerDescriptor> = Vec::new();
    for name in names {
        let descriptor = *registry.describe(name)?;
        if descriptor.name == pm.name {
            return Err(OpkError::UserConfigError(format!(
                "alt-pms in {} lists {}, which is already the primary pm",
                file, name
            )));
        }
        if alt_pms.iter().any(|d| d.name == descriptor.name) {
            return Err(OpkError::UserConfigError(format!(
                "alt-pms in {} lists {} more than once",
                file, name
            )));
        }
        alt_pms.push(descriptor);
    }
    Ok(alt_pms)
}

fn schema_error(file: &str, message: impl Into<String>) -> OpkError {
    OpkError::ParseError {
        file: file.to_string(),
        message: message.into(),
    }
}

/// `name "value"`: exactly one positional string, no properties
fn single_string(node: &KdlNode, file: &str) -> Result<String> {
    let name = node.name().value();
    let mut values = string_args(node, file)?;
    if values.len() != 1 {
        return Err(schema_error(
            file,
            format!("'{}' takes exactly one string value", name),
        ));
    }
    Ok(values.remove(0))
}

fn single_bool(node: &KdlNode, file: &str) -> Result<bool> {
    let name = node.name().value();
    match node.entries() {
        [entry] if entry.name().is_none() => entry.value().as_bool().ok_or_else(|| {
            schema_error(file, format!("'{}' takes #true or #false", name))
        }),
        _ => Err(schema_error(
            file,
            format!("'{}' takes exactly one boolean value", name),
        )),
    }
}

/// `name "a" "b"`: positional strings only, no children
fn string_args(node: &KdlNode, file: &str) -> Result<Vec<String>> {
    let name = node.name().value();
    if node.children().is_some_and(|c| !c.nodes().is_empty()) {
        return Err(schema_error(file, format!("'{}' does not take a block", name)));
    }

    let mut values = Vec::new();
    for entry in node.entries() {
        if entry.name().is_some() {
            return Err(schema_error(
                file,
                format!("'{}' does not take properties", name),
            ));
        }
        let value = entry.value().as_string().ok_or_else(|| {
            schema_error(file, format!("'{}' only takes string values", name))
        })?;
        values.push(value.to_string());
    }
    Ok(values)
}

/// `name { key "value" ... }`
fn string_map(node: &KdlNode, file: &str) -> Result<BTreeMap<String, String>> {
    let name = node.name().value();
    if !node.entries().is_empty() {
        return Err(schema_error(
            file,
            format!("'{}' takes a block of key \"value\" pairs", name),
        ));
    }

    let mut map = BTreeMap::new();
    let Some(children) = node.children() else {
        return Ok(map);
    };

    for child in children.nodes() {
        let key = child.name().value();
        let value = single_string(child, file).map_err(|_| {
            schema_error(
                file,
                format!("'{}' in '{}' takes exactly one string value", key, name),
            )
        })?;
        if map.insert(key.to_string(), value).is_some() {
            return Err(schema_error(
                file,
                format!("'{}' appears more than once in '{}'", key, name),
            ));
        }
    }
    Ok(map)
}

/// Quote a string for KDL output
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests;
