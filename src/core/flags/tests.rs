use super::*;
use crate::packages::builtin::{BUN, DENO, NPM, PNPM, YARN};
use std::collections::HashSet;

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn run(verb: ManagerVerb, tokens: &[&str], descriptor: &ManagerDescriptor) -> Result<NormalizedArgs> {
    normalize(&FlagTable::builtin(), verb, &args(tokens), descriptor)
}

fn flag_error(result: Result<NormalizedArgs>) -> String {
    match result {
        Err(OpkError::FlagError(msg)) => msg,
        other => panic!("expected FlagError, got {:?}", other),
    }
}

/// Descriptor with every flag filled in, so only applicability and
/// conflict rules can fail.
const FULL: ManagerDescriptor = ManagerDescriptor {
    name: "full",
    install: "full install",
    add: "full add",
    remove: "full remove",
    update: "full update",
    audit: "full audit",
    run: "full run",
    exec: "full exec",
    lock_flags: crate::packages::LockFlags {
        lock_only: "--frozen-lockfile",
        frozen_lockfile: "--immutable",
    },
    ignore_flags: crate::packages::IgnoreFlags {
        scripts: "--no-scripts",
        engines: "--no-engines",
        optional: "--no-optional",
        workspace_root_check: "-W",
        pnp: "--no-pnp",
    },
    scope_flags: crate::packages::ScopeFlags {
        production: "-P",
        dev: "-D",
        peer: "--save-peer",
        optional: "-O",
    },
    output_flags: crate::packages::OutputFlags {
        verbose: "--loud",
        silent: "--quiet",
    },
};

#[test]
fn flag_names_are_unique_across_rules() {
    let mut seen = HashSet::new();
    for rule in BUILTIN_RULES {
        for name in rule.names {
            assert!(seen.insert(*name), "duplicate flag spelling {}", name);
        }
    }
    let ids: HashSet<_> = BUILTIN_RULES.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), BUILTIN_RULES.len());
}

#[test]
fn every_name_resolves_to_its_rule() {
    let table = FlagTable::builtin();
    for rule in BUILTIN_RULES {
        for name in rule.names {
            assert_eq!(table.lookup(name).map(|r| r.id), Some(rule.id));
        }
    }
}

#[test]
fn maps_shared_flags_to_manager_spelling() {
    let out = run(ManagerVerb::Add, &["lodash", "--dev"], &NPM).expect("valid");
    assert_eq!(out.mapped_flags, vec!["--save-dev"]);
    assert_eq!(out.passthrough, vec!["lodash"]);
    assert_eq!(out.into_args(), vec!["--save-dev", "lodash"]);
}

#[test]
fn mapped_flags_precede_passthrough() {
    let out = run(
        ManagerVerb::Add,
        &["react", "--ignore-scripts", "react-dom", "--exact", "--dev"],
        &PNPM,
    )
    .expect("valid");
    assert_eq!(
        out.into_args(),
        vec!["--ignore-scripts", "--save-dev", "react", "react-dom", "--exact"]
    );
}

#[test]
fn inapplicable_flag_names_valid_verbs() {
    for rule in BUILTIN_RULES {
        for verb in ManagerVerb::NORMALIZED {
            if rule.applies_to(verb) {
                continue;
            }
            let msg = flag_error(run(verb, &[rule.primary_name(), "pkg"], &FULL));
            assert!(
                rule.applicable.iter().any(|v| msg.contains(v.as_str())),
                "message for {} on {} names no valid verb: {}",
                rule.id,
                verb,
                msg
            );
        }
    }
}

#[test]
fn lock_only_is_rejected_for_add() {
    let msg = flag_error(run(ManagerVerb::Add, &["--lock-only", "lodash"], &BUN));
    assert!(msg.contains("install"));
    assert!(msg.contains("update"));
}

#[test]
fn conflicting_scope_flags_fail_in_either_order() {
    let first = flag_error(run(ManagerVerb::Add, &["--dev", "--production", "lodash"], &BUN));
    let second = flag_error(run(ManagerVerb::Add, &["--production", "--dev", "lodash"], &BUN));
    assert!(first.contains("scope"));
    assert!(second.contains("scope"));
}

#[test]
fn every_group_pair_conflicts() {
    let table = FlagTable::builtin();
    for group in [ConflictGroup::Lock, ConflictGroup::Scope, ConflictGroup::Output] {
        let members = table.group_members(group);
        for a in &members {
            for b in &members {
                if a.id == b.id {
                    continue;
                }
                let verb = *a
                    .applicable
                    .iter()
                    .find(|v| b.applies_to(**v))
                    .expect("group members share a verb");
                let msg = flag_error(run(verb, &[a.primary_name(), b.primary_name(), "pkg"], &FULL));
                assert!(msg.contains("only one"), "{}", msg);
            }
        }
    }
}

#[test]
fn aliases_of_one_rule_do_not_conflict_and_emit_once() {
    let out = run(ManagerVerb::Install, &["--prod", "--production", "--prod"], &PNPM)
        .expect("same rule");
    assert_eq!(out.mapped_flags, vec!["--save-prod"]);
}

#[test]
fn unsupported_flag_names_the_manager() {
    let msg = flag_error(run(ManagerVerb::Add, &["lodash", "--ignore-scripts"], &DENO));
    assert!(msg.contains("--ignore-scripts"));
    assert!(msg.contains("deno"));
}

#[test]
fn lock_only_maps_to_descriptor_value() {
    let out = run(ManagerVerb::Install, &["--lock-only"], &FULL).expect("valid");
    assert_eq!(out.mapped_flags, vec!["--frozen-lockfile"]);
}

#[test]
fn tokens_after_separator_are_never_flags() {
    let out = run(
        ManagerVerb::Add,
        &["--dev", "--", "--production", "--lock-only", "pkg"],
        &YARN,
    )
    .expect("separator shields the rest");
    assert_eq!(out.mapped_flags, vec!["--dev"]);
    assert_eq!(out.passthrough, vec!["--", "--production", "--lock-only", "pkg"]);
}

#[test]
fn token_after_separator_counts_as_target() {
    let out = run(ManagerVerb::Remove, &["--", "--weird-name"], &NPM).expect("has target");
    assert_eq!(out.passthrough, vec!["--", "--weird-name"]);
}

#[test]
fn unknown_and_qualified_flags_pass_through() {
    let out = run(
        ManagerVerb::Install,
        &["--registry=https://example.test", "--future-flag", "--dev=true"],
        &NPM,
    )
    .expect("forward compatible");
    assert!(out.mapped_flags.is_empty());
    assert_eq!(
        out.passthrough,
        vec!["--registry=https://example.test", "--future-flag", "--dev=true"]
    );
}

#[test]
fn remove_without_packages_is_missing_argument() {
    match run(ManagerVerb::Remove, &[], &NPM) {
        Err(OpkError::MissingArgumentError(msg)) => assert!(msg.contains("remove")),
        other => panic!("expected MissingArgumentError, got {:?}", other),
    }
}

#[test]
fn flags_alone_do_not_satisfy_add() {
    assert!(matches!(
        run(ManagerVerb::Add, &["--dev", "--exact"], &BUN),
        Err(OpkError::MissingArgumentError(_))
    ));
}

#[test]
fn install_needs_no_target() {
    let out = run(ManagerVerb::Install, &["--frozen-lockfile"], &BUN).expect("valid");
    assert_eq!(out.into_args(), vec!["--frozen-lockfile"]);
}

#[test]
fn multi_word_resolution_is_split() {
    let out = run(ManagerVerb::Install, &["--ignore-optional"], &BUN).expect("valid");
    assert_eq!(out.mapped_flags, vec!["--omit", "optional"]);
}

#[test]
fn normalize_is_deterministic() {
    let tokens = ["a", "--silent", "--dev", "b", "--", "--peer"];
    let first = run(ManagerVerb::Add, &tokens, &YARN).expect("valid");
    for _ in 0..10 {
        assert_eq!(run(ManagerVerb::Add, &tokens, &YARN).expect("valid"), first);
    }
}
