//! Release notes shown once per installed version

use crate::project_identity;
use crate::ui;
use crate::utils::paths;
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Print the release notes when the running version differs from the one
/// recorded in the marker, or when `always` is set, then record it. Marker
/// I/O failures never stop the command.
pub fn announce_if_new(always: bool) {
    let Ok(path) = paths::version_marker() else {
        ui::debug("no state directory, skipping release notes");
        return;
    };
    if announce_with_marker(&path, project_identity::current_version(), always) {
        print_release_notes(project_identity::current_version());
    }
}

/// Update the marker at `path`; returns whether notes should be printed
pub(crate) fn announce_with_marker(path: &Path, version: &str, always: bool) -> bool {
    let stored = fs::read_to_string(path).unwrap_or_default();
    if stored.trim() == version && !always {
        return false;
    }

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Err(e) = fs::write(path, format!("{}\n", version)) {
        ui::debug(&format!("could not write {}: {}", path.display(), e));
    }
    true
}

fn print_release_notes(version: &str) {
    if ui::is_quiet() {
        return;
    }
    println!(
        "{}",
        format!("Welcome back to {}!", project_identity::DISPLAY_NAME)
            .magenta()
            .bold()
    );
    println!("{}", format!("What's new in {}:", version).purple());
    println!("{}", project_identity::WHATS_NEW);
    ui::separator();
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_run_announces_and_records_version() {
        let dir = tempdir().expect("tempdir");
        let marker = dir.path().join("nested").join("last-installed-version");

        assert!(announce_with_marker(&marker, "0.4.1", false));
        assert_eq!(fs::read_to_string(&marker).expect("read"), "0.4.1\n");
    }

    #[test]
    fn same_version_is_silent_unless_forced() {
        let dir = tempdir().expect("tempdir");
        let marker = dir.path().join("last-installed-version");
        fs::write(&marker, "0.4.1\n").expect("write");

        assert!(!announce_with_marker(&marker, "0.4.1", false));
        assert!(announce_with_marker(&marker, "0.4.1", true));
    }

    #[test]
    fn version_change_announces() {
        let dir = tempdir().expect("tempdir");
        let marker = dir.path().join("last-installed-version");
        fs::write(&marker, "0.3.0\n").expect("write");

        assert!(announce_with_marker(&marker, "0.4.1", false));
        assert_eq!(fs::read_to_string(&marker).expect("read"), "0.4.1\n");
    }
}
