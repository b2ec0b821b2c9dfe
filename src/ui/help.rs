use crate::core::flags::rules::FlagTable;
use crate::core::types::ManagerVerb;
use crate::project_identity;
use colored::Colorize;
use std::fmt::Write;

const USAGE: &[(&str, &[&str])] = &[
    (
        "Package management",
        &[
            "add <pkg...>",
            "remove <pkg...>",
            "install",
            "update [pkg...]",
            "audit",
        ],
    ),
    ("Execution", &["run <script> [args...]", "exec <cmd> [args...]"]),
    (
        "Project",
        &[
            "init",
            "migrate",
            "sync [configPath] [manifestPath]",
            "generate [configPath] [manifestPath]",
        ],
    ),
    ("Info", &["help", "list [manifestPath]", "info [pkg]"]),
];

const GLOBAL_OPTIONS: &[(&str, &str)] = &[
    ("-C <dir>", "run as if started in <dir>"),
    ("--quiet", "only print warnings and errors"),
    ("--debug", "print every command before it runs"),
    ("--no-format", "skip kdlfmt during sync"),
    ("--whats-new", "show the release notes again"),
];

pub fn print_help(table: &FlagTable) {
    print!("{}", help_text(table));
}

pub fn help_text(table: &FlagTable) -> String {
    let bin = project_identity::BINARY_NAME;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        bin.magenta().bold(),
        format!("- {}", project_identity::DESCRIPTION).purple()
    );
    let _ = writeln!(
        out,
        "{}",
        format!("Version: {}", project_identity::current_version()).dimmed()
    );

    let _ = writeln!(out, "\n{}", "Usage:".purple().bold());
    for (section, commands) in USAGE {
        let _ = writeln!(out, " {}:", section);
        for command in *commands {
            let _ = writeln!(out, "  {} {}", bin.dimmed(), command);
        }
        if *section == "Execution" {
            let _ = writeln!(
                out,
                "  {} <cmd> [args...]",
                project_identity::EXEC_BINARY_NAME.dimmed()
            );
        }
    }

    let _ = writeln!(out, "\n{}", "Options:".purple().bold());
    for (option, about) in GLOBAL_OPTIONS {
        let _ = writeln!(out, "  {:<14} {}", option, about);
    }

    let _ = writeln!(out, "\n{}", "Shared PM flags:".purple().bold());
    for line in flag_lines(table) {
        let _ = writeln!(out, "  {} {}", "∙".dimmed(), line);
    }

    let _ = writeln!(out, "\n{}", "Notes:".purple().bold());
    let notes = [
        format!(
            "PM-backed commands use the manager set by pm in {}",
            project_identity::CONFIG_FILE_BASENAME
        ),
        format!(
            "Without {}, the manager is inferred from lockfiles",
            project_identity::CONFIG_FILE_BASENAME
        ),
        format!(
            "{} is regenerated after every add, remove, install and update",
            project_identity::MANIFEST_FILE_BASENAME
        ),
    ];
    for note in notes {
        let _ = writeln!(out, "  {} {}", "∙".dimmed(), note);
    }

    out
}

/// One line per run of rules sharing the same verbs, in table order
fn flag_lines(table: &FlagTable) -> Vec<String> {
    let mut lines = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut current: Option<&'static [ManagerVerb]> = None;

    for rule in table.rules() {
        if current.is_some_and(|verbs| verbs != rule.applicable) {
            if let Some(verbs) = current {
                lines.push(format_flag_line(&names, verbs));
            }
            names.clear();
        }
        current = Some(rule.applicable);
        names.push(rule.names.join(" / "));
    }
    if let Some(verbs) = current {
        lines.push(format_flag_line(&names, verbs));
    }

    lines
}

fn format_flag_line(names: &[String], verbs: &[ManagerVerb]) -> String {
    let verbs: Vec<&str> = verbs.iter().map(ManagerVerb::as_str).collect();
    format!("{} ({})", names.join(", "), verbs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shared_flag_is_listed() {
        colored::control::set_override(false);
        let table = FlagTable::builtin();
        let text = help_text(&table);
        for rule in table.rules() {
            for name in rule.names {
                assert!(text.contains(name), "{} missing from help", name);
            }
        }
    }

    #[test]
    fn flags_are_grouped_by_verbs() {
        let lines = flag_lines(&FlagTable::builtin());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "--lock-only, --frozen-lockfile (install, update)");
        assert!(lines[2].starts_with("--verbose, --silent ("));
    }
}
