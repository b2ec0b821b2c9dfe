use std::fmt;
use std::str::FromStr;

// Verbs that are backed by the selected package manager.
// `Run` and `Exec` forward their arguments untouched; the others go through
// flag normalization.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ManagerVerb {
    Add,
    Remove,
    Install,
    Update,
    Audit,
    Run,
    Exec,
}

impl ManagerVerb {
    pub const NORMALIZED: [ManagerVerb; 5] = [
        ManagerVerb::Add,
        ManagerVerb::Remove,
        ManagerVerb::Install,
        ManagerVerb::Update,
        ManagerVerb::Audit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Install => "install",
            Self::Update => "update",
            Self::Audit => "audit",
            Self::Run => "run",
            Self::Exec => "exec",
        }
    }

    /// Changes dependencies, so the config must be synchronized afterwards
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Remove | Self::Install | Self::Update
        )
    }

    /// Needs at least one positional target
    pub fn requires_target(&self) -> bool {
        matches!(self, Self::Add | Self::Remove | Self::Run | Self::Exec)
    }

    /// Arguments are checked against the shared flag table
    pub fn normalizes_flags(&self) -> bool {
        !matches!(self, Self::Run | Self::Exec)
    }
}

impl fmt::Display for ManagerVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One router state per CLI verb, aliases folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Help,
    Init,
    Migrate,
    List,
    Info,
    Sync,
    Generate,
    Manager(ManagerVerb),
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = match s {
            "help" | "--help" | "-h" => Verb::Help,
            "init" => Verb::Init,
            "migrate" => Verb::Migrate,
            "list" => Verb::List,
            "info" => Verb::Info,
            "sync" => Verb::Sync,
            "generate" => Verb::Generate,
            "run" => Verb::Manager(ManagerVerb::Run),
            "exec" => Verb::Manager(ManagerVerb::Exec),
            "add" => Verb::Manager(ManagerVerb::Add),
            "remove" | "rm" | "un" => Verb::Manager(ManagerVerb::Remove),
            "install" | "i" => Verb::Manager(ManagerVerb::Install),
            "update" | "up" => Verb::Manager(ManagerVerb::Update),
            "audit" => Verb::Manager(ManagerVerb::Audit),
            other => return Err(other.to_string()),
        };
        Ok(verb)
    }
}
