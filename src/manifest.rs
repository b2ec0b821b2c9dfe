//! package.json generation and reading
//!
//! The manifest is a pure function of the loaded config: keys in a fixed
//! order, maps sorted, two-space indentation and a trailing newline, so the
//! same config always produces the same bytes.

mod import;

use crate::config::types::{DependencyKind, DependencyMap, DependencySet, PackageConfig};
use crate::error::{OpkError, Result};
use crate::utils::atomic::write_atomic;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use import::{ImportedManifest, config_from_manifest};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    module_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<&'a str>,
    #[serde(skip_serializing_if = "map_is_empty")]
    bin: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "list_is_empty")]
    files: &'a [String],
    #[serde(skip_serializing_if = "list_is_empty")]
    keywords: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    homepage: Option<&'a str>,
    #[serde(skip_serializing_if = "map_is_empty")]
    scripts: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<&'a DependencyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dev_dependencies: Option<&'a DependencyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    peer_dependencies: Option<&'a DependencyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional_dependencies: Option<&'a DependencyMap>,
}

fn map_is_empty(map: &&BTreeMap<String, String>) -> bool {
    map.is_empty()
}

fn list_is_empty(list: &&[String]) -> bool {
    list.is_empty()
}

/// Render the manifest for `config`
pub fn render(config: &PackageConfig) -> Result<String> {
    let meta = &config.metadata;
    let deps = &config.dependencies;

    let manifest = Manifest {
        name: meta.name.as_deref(),
        version: meta.version.as_deref(),
        description: meta.description.as_deref(),
        license: meta.license.as_deref(),
        module_type: meta.module_type.map(|t| t.to_string()),
        private: meta.private,
        main: meta.main.as_deref(),
        module: meta.module.as_deref(),
        bin: &meta.bin,
        files: &meta.files,
        keywords: &meta.keywords,
        repository: meta.repository.as_deref(),
        homepage: meta.homepage.as_deref(),
        scripts: &config.scripts,
        dependencies: deps.get(DependencyKind::Dependencies),
        dev_dependencies: deps.get(DependencyKind::DevDependencies),
        peer_dependencies: deps.get(DependencyKind::PeerDependencies),
        optional_dependencies: deps.get(DependencyKind::OptionalDependencies),
    };

    let mut out = serde_json::to_string_pretty(&manifest)?;
    out.push('\n');
    Ok(out)
}

/// Regenerate the manifest at `path`. Returns whether the bytes changed.
pub fn write(config: &PackageConfig, path: &Path) -> Result<bool> {
    let content = render(config)?;
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }
    write_atomic(path, &content)?;
    Ok(true)
}

/// Parse a manifest file into a JSON object
pub fn read_object(path: &Path) -> Result<serde_json::Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| OpkError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| OpkError::ParseError {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(OpkError::ParseError {
            file: path.display().to_string(),
            message: "expected a JSON object at the top level".to_string(),
        }),
    }
}

/// Dependency maps of the manifest at `path`. A missing manifest has none.
pub fn read_dependencies(path: &Path) -> Result<DependencySet> {
    if !path.is_file() {
        return Ok(DependencySet::default());
    }
    Ok(dependencies_of(&read_object(path)?))
}

pub(crate) fn dependencies_of(object: &serde_json::Map<String, Value>) -> DependencySet {
    let mut set = DependencySet::default();
    for kind in DependencyKind::ALL {
        set.set_map(kind, string_map(object.get(kind.manifest_key())));
    }
    set
}

/// String-valued entries of a JSON object; anything else is skipped
pub(crate) fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

/// Name, version and dependencies of a manifest, as shown by `list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub script_count: usize,
    pub dependencies: DependencySet,
}

impl ManifestSummary {
    pub fn read(path: &Path) -> Result<Self> {
        let object = read_object(path)?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            name: text("name"),
            version: text("version"),
            description: text("description"),
            script_count: string_map(object.get("scripts")).len(),
            dependencies: dependencies_of(&object),
        })
    }
}
