use super::{dependencies_of, string_map};
use crate::config::types::{ModuleType, PackageConfig};
use crate::packages::ManagerDescriptor;
use serde_json::{Map, Value};

/// Fields package.json may carry that package.kdl stores elsewhere or drops
const CONSUMED: &[&str] = &[
    "name",
    "version",
    "description",
    "license",
    "type",
    "private",
    "main",
    "module",
    "homepage",
    "repository",
    "keywords",
    "files",
    "bin",
    "scripts",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Fields dropped silently: they only describe the manager itself
const DISCARDED: &[&str] = &["packageManager"];

#[derive(Debug)]
pub struct ImportedManifest {
    pub config: PackageConfig,
    /// Fields that could not be carried into package.kdl
    pub skipped: Vec<String>,
}

/// Build a config from an existing package.json object
pub fn config_from_manifest(object: &Map<String, Value>, pm: ManagerDescriptor) -> ImportedManifest {
    let mut config = PackageConfig::new(pm);
    let mut skipped = Vec::new();
    let meta = &mut config.metadata;

    let text = |key: &str, skipped: &mut Vec<String>| match object.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            skipped.push(key.to_string());
            None
        }
    };

    meta.name = text("name", &mut skipped);
    meta.version = text("version", &mut skipped);
    meta.description = text("description", &mut skipped);
    meta.license = text("license", &mut skipped);
    meta.main = text("main", &mut skipped);
    meta.module = text("module", &mut skipped);
    meta.homepage = text("homepage", &mut skipped);

    meta.repository = match object.get("repository") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(repo)) => match repo.get("url").and_then(Value::as_str) {
            Some(url) => Some(url.to_string()),
            None => {
                skipped.push("repository".to_string());
                None
            }
        },
        Some(_) => {
            skipped.push("repository".to_string());
            None
        }
    };

    if let Some(raw) = text("type", &mut skipped) {
        match raw.parse::<ModuleType>() {
            Ok(t) => meta.module_type = Some(t),
            Err(_) => skipped.push("type".to_string()),
        }
    }

    match object.get("private") {
        None => {}
        Some(Value::Bool(b)) => meta.private = Some(*b),
        Some(_) => skipped.push("private".to_string()),
    }

    meta.keywords = string_list(object.get("keywords"), "keywords", &mut skipped);
    meta.files = string_list(object.get("files"), "files", &mut skipped);

    match object.get("bin") {
        None => {}
        Some(Value::String(path)) => {
            // A bare path is exposed under the package name
            match &meta.name {
                Some(name) => {
                    let command = name.rsplit('/').next().unwrap_or(name).to_string();
                    meta.bin.insert(command, path.clone());
                }
                None => skipped.push("bin".to_string()),
            }
        }
        Some(value @ Value::Object(_)) => meta.bin = string_map(Some(value)),
        Some(_) => skipped.push("bin".to_string()),
    }

    config.scripts = string_map(object.get("scripts"));
    config.dependencies = dependencies_of(object);

    for key in object.keys() {
        if !CONSUMED.contains(&key.as_str()) && !DISCARDED.contains(&key.as_str()) {
            skipped.push(key.clone());
        }
    }

    ImportedManifest { config, skipped }
}

fn string_list(value: Option<&Value>, key: &str, skipped: &mut Vec<String>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(_) => {
            skipped.push(key.to_string());
            Vec::new()
        }
    }
}
