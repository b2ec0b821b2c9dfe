use crate::core::types::ManagerVerb;
use crate::packages::ManagerDescriptor;
use std::collections::HashMap;
use std::fmt;

const INSTALL_UPDATE: &[ManagerVerb] = &[ManagerVerb::Install, ManagerVerb::Update];
const ADD_INSTALL_UPDATE: &[ManagerVerb] =
    &[ManagerVerb::Add, ManagerVerb::Install, ManagerVerb::Update];
const ALL_MANAGER_VERBS: &[ManagerVerb] = &ManagerVerb::NORMALIZED;

/// Flags in the same group are mutually exclusive within one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictGroup {
    Lock,
    Scope,
    Output,
}

impl fmt::Display for ConflictGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lock => write!(f, "lock"),
            Self::Scope => write!(f, "scope"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// One shared flag and how each manager spells it
pub struct FlagRule {
    pub id: &'static str,
    pub names: &'static [&'static str],
    pub applicable: &'static [ManagerVerb],
    pub conflict_group: Option<ConflictGroup>,
    pub resolve: fn(&ManagerDescriptor) -> &'static str,
}

impl FlagRule {
    /// Canonical spelling, used in diagnostics
    pub fn primary_name(&self) -> &'static str {
        self.names[0]
    }

    pub fn applies_to(&self, verb: ManagerVerb) -> bool {
        self.applicable.contains(&verb)
    }
}

impl fmt::Debug for FlagRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagRule")
            .field("id", &self.id)
            .field("names", &self.names)
            .field("conflict_group", &self.conflict_group)
            .finish()
    }
}

pub const BUILTIN_RULES: &[FlagRule] = &[
    // --- lock group ---
    FlagRule {
        id: "lock-only",
        names: &["--lock-only"],
        applicable: INSTALL_UPDATE,
        conflict_group: Some(ConflictGroup::Lock),
        resolve: |d| d.lock_flags.lock_only,
    },
    FlagRule {
        id: "frozen-lockfile",
        names: &["--frozen-lockfile"],
        applicable: INSTALL_UPDATE,
        conflict_group: Some(ConflictGroup::Lock),
        resolve: |d| d.lock_flags.frozen_lockfile,
    },
    // --- ignore flags, freely combinable ---
    FlagRule {
        id: "ignore-scripts",
        names: &["--ignore-scripts"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: None,
        resolve: |d| d.ignore_flags.scripts,
    },
    FlagRule {
        id: "ignore-engines",
        names: &["--ignore-engines"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: None,
        resolve: |d| d.ignore_flags.engines,
    },
    FlagRule {
        id: "ignore-optional",
        names: &["--ignore-optional"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: None,
        resolve: |d| d.ignore_flags.optional,
    },
    FlagRule {
        id: "ignore-workspace-root-check",
        names: &["--ignore-workspace-root-check"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: None,
        resolve: |d| d.ignore_flags.workspace_root_check,
    },
    FlagRule {
        id: "ignore-pnp",
        names: &["--ignore-pnp"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: None,
        resolve: |d| d.ignore_flags.pnp,
    },
    // --- scope group ---
    FlagRule {
        id: "production",
        names: &["--production", "--prod"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: Some(ConflictGroup::Scope),
        resolve: |d| d.scope_flags.production,
    },
    FlagRule {
        id: "dev",
        names: &["--dev"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: Some(ConflictGroup::Scope),
        resolve: |d| d.scope_flags.dev,
    },
    FlagRule {
        id: "peer",
        names: &["--peer"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: Some(ConflictGroup::Scope),
        resolve: |d| d.scope_flags.peer,
    },
    FlagRule {
        id: "optional",
        names: &["--optional"],
        applicable: ADD_INSTALL_UPDATE,
        conflict_group: Some(ConflictGroup::Scope),
        resolve: |d| d.scope_flags.optional,
    },
    // --- output group ---
    FlagRule {
        id: "verbose",
        names: &["--verbose"],
        applicable: ALL_MANAGER_VERBS,
        conflict_group: Some(ConflictGroup::Output),
        resolve: |d| d.output_flags.verbose,
    },
    FlagRule {
        id: "silent",
        names: &["--silent"],
        applicable: ALL_MANAGER_VERBS,
        conflict_group: Some(ConflictGroup::Output),
        resolve: |d| d.output_flags.silent,
    },
];

/// Name-indexed view over a rule set
pub struct FlagTable {
    rules: &'static [FlagRule],
    by_name: HashMap<&'static str, usize>,
}

impl Default for FlagTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FlagTable {
    pub fn builtin() -> Self {
        Self::from_rules(BUILTIN_RULES)
    }

    /// Index `rules` by every spelling. A later rule never shadows an
    /// earlier one; the built-in table is checked for collisions in tests.
    pub fn from_rules(rules: &'static [FlagRule]) -> Self {
        let mut by_name = HashMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            for name in rule.names {
                by_name.entry(*name).or_insert(idx);
            }
        }
        Self { rules, by_name }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static FlagRule> {
        let rules = self.rules;
        self.by_name.get(name).map(|idx| &rules[*idx])
    }

    pub fn rules(&self) -> &'static [FlagRule] {
        self.rules
    }

    /// Rules sharing a conflict group, in table order
    pub fn group_members(&self, group: ConflictGroup) -> Vec<&'static FlagRule> {
        self.rules
            .iter()
            .filter(|r| r.conflict_group == Some(group))
            .collect()
    }
}
