use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// A project dir plus an isolated state dir, so release notes and lock
// files never touch the real home directory.
struct Sandbox {
    project: TempDir,
    state: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            project: tempfile::tempdir().unwrap(),
            state: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.project.path().join(name), content).unwrap();
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.project.path().join(name)).unwrap()
    }

    fn opk(&self) -> Command {
        self.bin(env!("CARGO_BIN_EXE_opk"))
    }

    fn opx(&self) -> Command {
        self.bin(env!("CARGO_BIN_EXE_opx"))
    }

    fn bin(&self, path: &str) -> Command {
        let mut cmd = Command::new(path);
        cmd.current_dir(self.project.path())
            .env("OPK_STATE_DIR", self.state.path())
            .env("NO_COLOR", "1")
            .env_remove("OPK_NO_FORMAT");
        cmd
    }
}

#[test]
fn test_help_command() {
    let sandbox = Sandbox::new();

    sandbox
        .opk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add <pkg...>"))
        .stdout(predicate::str::contains("--lock-only"));
}

#[test]
fn test_no_command_generates_manifest() {
    let sandbox = Sandbox::new();

    sandbox
        .opk()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("opk init"));

    sandbox.write("package.kdl", "pm \"bun\"\nname \"bare\"\n");
    sandbox.opk().assert().success();
    assert!(sandbox.read("package.json").contains("\"name\": \"bare\""));
}

#[test]
fn test_version_flag() {
    let sandbox = Sandbox::new();
    let expected = format!("opk {}", env!("CARGO_PKG_VERSION"));

    sandbox
        .opk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_release_notes_only_on_first_run() {
    let sandbox = Sandbox::new();

    sandbox
        .opk()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's new"));
    sandbox
        .opk()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's new").not());
    sandbox
        .opk()
        .args(["--whats-new", "help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("What's new"));
}

#[test]
fn test_unknown_command() {
    let sandbox = Sandbox::new();

    sandbox
        .opk()
        .arg("unknown-command-xyz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: unknown-command-xyz"));
}

#[test]
fn test_bad_global_flag_is_one_line_exit_one() {
    let sandbox = Sandbox::new();

    sandbox
        .opk()
        .arg("-C")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("-C"))
        .stderr(predicate::str::contains("Usage").not());
}

#[test]
fn test_generate_without_config_names_remediation() {
    let sandbox = Sandbox::new();

    sandbox
        .opk()
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("opk init"))
        .stderr(predicate::str::contains("opk migrate"));
    assert!(!sandbox.project.path().join("package.json").exists());
}

#[test]
fn test_generate_writes_manifest() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "package.kdl",
        "pm \"npm\"\nname \"demo\"\nversion \"1.0.0\"\n\ndependencies {\n    lodash \"^4.17.21\"\n}\n",
    );

    sandbox.opk().arg("generate").assert().success();

    let manifest = sandbox.read("package.json");
    assert!(manifest.starts_with("{\n  \"name\": \"demo\",\n  \"version\": \"1.0.0\""));
    assert!(manifest.contains("\"lodash\": \"^4.17.21\""));
    assert!(manifest.ends_with("}\n"));
}

#[test]
fn test_directory_flag_targets_other_project() {
    let sandbox = Sandbox::new();
    let other = tempfile::tempdir().unwrap();
    fs::write(other.path().join("package.kdl"), "pm \"bun\"\nname \"elsewhere\"\n").unwrap();

    sandbox
        .opk()
        .arg("-C")
        .arg(other.path())
        .arg("generate")
        .assert()
        .success();

    let manifest = fs::read_to_string(other.path().join("package.json")).unwrap();
    assert!(manifest.contains("elsewhere"));
    assert!(!sandbox.project.path().join("package.json").exists());
}

#[test]
fn test_sync_is_idempotent() {
    let sandbox = Sandbox::new();
    sandbox.write("package.kdl", "pm \"bun\"\nname \"demo\"\n");
    sandbox.write(
        "package.json",
        "{\n  \"name\": \"demo\",\n  \"devDependencies\": {\n    \"typescript\": \"^5.6.0\"\n  }\n}\n",
    );

    sandbox.opk().args(["--no-format", "sync"]).assert().success();
    let config = sandbox.read("package.kdl");
    let manifest = sandbox.read("package.json");
    assert!(config.contains("dev-dependencies"));
    assert!(config.contains("typescript"));

    sandbox.opk().args(["--no-format", "sync"]).assert().success();
    assert_eq!(sandbox.read("package.kdl"), config);
    assert_eq!(sandbox.read("package.json"), manifest);
    assert!(!sandbox.project.path().join(".opk.lock").exists());
}

#[test]
fn test_list_prints_dependencies() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "package.json",
        r#"{"name": "demo", "version": "2.0.0", "dependencies": {"lodash": "^4.17.21"}}"#,
    );

    sandbox
        .opk()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo 2.0.0"))
        .stdout(predicate::str::contains("lodash"));
}

#[test]
fn test_flag_errors_exit_before_spawning() {
    let sandbox = Sandbox::new();
    sandbox.write("package.kdl", "pm \"pnpm\"\n");

    sandbox
        .opk()
        .args(["add", "--lock-only", "react"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--lock-only cannot be used with 'add'"));
    sandbox
        .opk()
        .args(["install", "--dev", "--prod"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("conflicts with"));
    assert!(!sandbox.project.path().join("package.json").exists());
}

#[test]
fn test_opx_requires_a_command() {
    let sandbox = Sandbox::new();

    sandbox
        .opx()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("opk exec requires at least one"));
}

#[test]
fn test_init_refuses_existing_manifest() {
    let sandbox = Sandbox::new();
    sandbox.write("package.json", "{}\n");

    sandbox
        .opk()
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("opk migrate"));
}

#[test]
fn test_migrate_then_generate_round_trip() {
    let sandbox = Sandbox::new();
    sandbox.write("package-lock.json", "{}");
    sandbox.write(
        "package.json",
        r#"{"name": "legacy", "scripts": {"build": "tsc"}, "dependencies": {"zod": "^3.23.0"}}"#,
    );

    sandbox.opk().args(["--no-format", "migrate"]).assert().success();
    let config = sandbox.read("package.kdl");
    assert!(config.starts_with("pm \"npm\""));

    sandbox.opk().arg("generate").assert().success();
    let manifest = sandbox.read("package.json");
    assert!(manifest.contains("\"build\": \"tsc\""));
    assert!(manifest.contains("\"zod\": \"^3.23.0\""));
}
