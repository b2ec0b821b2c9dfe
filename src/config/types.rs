use crate::packages::ManagerDescriptor;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The four dependency maps a manifest can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 4] = [
        DependencyKind::Dependencies,
        DependencyKind::DevDependencies,
        DependencyKind::PeerDependencies,
        DependencyKind::OptionalDependencies,
    ];

    /// Node name in package.kdl
    pub fn kdl_name(&self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "dev-dependencies",
            Self::PeerDependencies => "peer-dependencies",
            Self::OptionalDependencies => "optional-dependencies",
        }
    }

    /// Key in package.json
    pub fn manifest_key(&self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
            Self::PeerDependencies => "peerDependencies",
            Self::OptionalDependencies => "optionalDependencies",
        }
    }

    pub fn from_kdl_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.kdl_name() == name)
    }
}

/// Package name → version range
pub type DependencyMap = BTreeMap<String, String>;

/// All dependency maps of a project, keyed by kind. Absent kinds are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    maps: BTreeMap<DependencyKind, DependencyMap>,
}

impl DependencySet {
    pub fn get(&self, kind: DependencyKind) -> Option<&DependencyMap> {
        self.maps.get(&kind).filter(|m| !m.is_empty())
    }

    pub fn version_of(&self, kind: DependencyKind, name: &str) -> Option<&str> {
        self.maps
            .get(&kind)
            .and_then(|m| m.get(name))
            .map(String::as_str)
    }

    pub fn set_map(&mut self, kind: DependencyKind, map: DependencyMap) {
        if map.is_empty() {
            self.maps.remove(&kind);
        } else {
            self.maps.insert(kind, map);
        }
    }

    pub fn insert(&mut self, kind: DependencyKind, name: &str, version: &str) {
        self.maps
            .entry(kind)
            .or_default()
            .insert(name.to_string(), version.to_string());
    }

    pub fn remove(&mut self, kind: DependencyKind, name: &str) {
        if let Some(map) = self.maps.get_mut(&kind) {
            map.remove(name);
            if map.is_empty() {
                self.maps.remove(&kind);
            }
        }
    }

    pub fn count(&self, kind: DependencyKind) -> usize {
        self.maps.get(&kind).map_or(0, |m| m.len())
    }

    /// Non-empty maps in manifest order
    pub fn iter(&self) -> impl Iterator<Item = (DependencyKind, &DependencyMap)> {
        DependencyKind::ALL
            .into_iter()
            .filter_map(|k| self.get(k).map(|m| (k, m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
    Module,
    CommonJs,
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::CommonJs => write!(f, "commonjs"),
        }
    }
}

impl FromStr for ModuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(Self::Module),
            "commonjs" => Ok(Self::CommonJs),
            other => Err(format!(
                "invalid type '{}': expected \"module\" or \"commonjs\"",
                other
            )),
        }
    }
}

/// Manifest fields carried by package.kdl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub module_type: Option<ModuleType>,
    pub private: Option<bool>,
    pub main: Option<String>,
    pub module: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub keywords: Vec<String>,
    pub files: Vec<String>,
    pub bin: BTreeMap<String, String>,
}

/// Loaded package.kdl. Never edited in place: changes go through the file
/// and a fresh load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    pub pm: ManagerDescriptor,
    pub alt_pms: Vec<ManagerDescriptor>,
    pub metadata: ProjectMetadata,
    pub scripts: BTreeMap<String, String>,
    pub dependencies: DependencySet,
}

impl PackageConfig {
    pub fn new(pm: ManagerDescriptor) -> Self {
        Self {
            pm,
            alt_pms: Vec::new(),
            metadata: ProjectMetadata::default(),
            scripts: BTreeMap::new(),
            dependencies: DependencySet::default(),
        }
    }
}

#[cfg(test)]
mod tests;
