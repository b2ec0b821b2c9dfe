//! Flag normalization
//!
//! Maps the shared, manager-agnostic flags (`--dev`, `--lock-only`, ...)
//! onto the spelling of the selected package manager and rejects
//! combinations that make no sense for the verb.
//!
//! The output order is fixed: every mapped flag first, in the order its rule
//! fired, then every passthrough token in its original order. Callers must
//! not rely on flags and positionals keeping their interleaving.

pub mod rules;

pub use rules::{BUILTIN_RULES, ConflictGroup, FlagRule, FlagTable};

use crate::core::types::ManagerVerb;
use crate::error::{OpkError, Result};
use crate::packages::ManagerDescriptor;
use std::collections::HashMap;

/// Everything after this token is forwarded verbatim
pub const SEPARATOR: &str = "--";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    pub mapped_flags: Vec<String>,
    pub passthrough: Vec<String>,
}

impl NormalizedArgs {
    /// Final argument list for the manager invocation
    pub fn into_args(self) -> Vec<String> {
        let mut args = self.mapped_flags;
        args.extend(self.passthrough);
        args
    }
}

/// Validate and translate `args` for `verb` against `descriptor`.
pub fn normalize(
    table: &FlagTable,
    verb: ManagerVerb,
    args: &[String],
    descriptor: &ManagerDescriptor,
) -> Result<NormalizedArgs> {
    let mut normalized = NormalizedArgs::default();
    let mut fired: Vec<&'static str> = Vec::new();
    let mut groups: HashMap<ConflictGroup, &'static FlagRule> = HashMap::new();
    let mut has_positional = false;
    let mut after_separator = false;

    for token in args {
        if after_separator {
            has_positional = true;
            normalized.passthrough.push(token.clone());
            continue;
        }

        if token == SEPARATOR {
            after_separator = true;
            normalized.passthrough.push(token.clone());
            continue;
        }

        if !token.starts_with('-') {
            has_positional = true;
            normalized.passthrough.push(token.clone());
            continue;
        }

        // Already-qualified (`--registry=...`) or unknown flags ride through
        // to the manager untouched.
        let rule = match table.lookup(token) {
            Some(rule) if !token.contains('=') => rule,
            _ => {
                normalized.passthrough.push(token.clone());
                continue;
            }
        };

        if !rule.applies_to(verb) {
            return Err(OpkError::FlagError(format!(
                "{} cannot be used with '{}'. It is valid for: {}",
                token,
                verb,
                verb_list(rule.applicable)
            )));
        }

        if let Some(group) = rule.conflict_group {
            match groups.get(&group) {
                Some(previous) if previous.id != rule.id => {
                    return Err(OpkError::FlagError(format!(
                        "{} conflicts with {}: only one {} flag ({}) may be used",
                        token,
                        previous.primary_name(),
                        group,
                        group_names(table, group)
                    )));
                }
                _ => {
                    groups.insert(group, rule);
                }
            }
        }

        if fired.contains(&rule.id) {
            continue;
        }

        let resolved = (rule.resolve)(descriptor);
        if resolved.trim().is_empty() {
            return Err(OpkError::FlagError(format!(
                "{} is not supported by {}",
                token, descriptor.name
            )));
        }

        fired.push(rule.id);
        normalized
            .mapped_flags
            .extend(resolved.split_whitespace().map(str::to_string));
    }

    if verb.requires_target() && !has_positional {
        return Err(missing_target(verb));
    }

    Ok(normalized)
}

pub(crate) fn missing_target(verb: ManagerVerb) -> OpkError {
    let what = match verb {
        ManagerVerb::Add | ManagerVerb::Remove => "package",
        ManagerVerb::Run => "script",
        _ => "argument",
    };
    OpkError::MissingArgumentError(format!(
        "opk {} requires at least one {}",
        verb, what
    ))
}

fn verb_list(verbs: &[ManagerVerb]) -> String {
    verbs
        .iter()
        .map(ManagerVerb::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn group_names(table: &FlagTable, group: ConflictGroup) -> String {
    table
        .group_members(group)
        .iter()
        .map(|r| r.primary_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;
