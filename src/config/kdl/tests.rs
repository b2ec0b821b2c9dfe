use super::*;
use crate::config::types::ModuleType;

fn parse(content: &str) -> Result<PackageConfig> {
    parse_package_config(content, "package.kdl", &ManagerRegistry::new())
}

#[test]
fn parses_full_config() {
    let content = r#"
// project config
pm "pnpm"
alt-pms "npm" "bun"
name "demo"
version "1.2.3"
description "A demo"
license "MIT"
type "module"
private #true
keywords "cli" "tools"
files "dist"
bin { demo "./dist/cli.js" }
scripts {
    build "tsc -p ."
    test "vitest"
}
dependencies {
    "@scope/pkg" "^0.5.0"
    lodash "^4.17.21"
}
dev-dependencies { typescript "^5" }
"#;
    let config = parse(content).expect("valid config");

    assert_eq!(config.pm.name, "pnpm");
    let alt: Vec<_> = config.alt_pms.iter().map(|d| d.name).collect();
    assert_eq!(alt, vec!["npm", "bun"]);
    assert_eq!(config.metadata.name.as_deref(), Some("demo"));
    assert_eq!(config.metadata.module_type, Some(ModuleType::Module));
    assert_eq!(config.metadata.private, Some(true));
    assert_eq!(config.metadata.keywords, vec!["cli", "tools"]);
    assert_eq!(config.metadata.bin.get("demo").map(String::as_str), Some("./dist/cli.js"));
    assert_eq!(config.scripts.len(), 2);
    assert_eq!(
        config
            .dependencies
            .version_of(DependencyKind::Dependencies, "@scope/pkg"),
        Some("^0.5.0")
    );
    assert_eq!(config.dependencies.count(DependencyKind::DevDependencies), 1);
    assert_eq!(config.dependencies.count(DependencyKind::PeerDependencies), 0);
}

#[test]
fn missing_pm_is_a_user_config_error() {
    match parse("name \"demo\"\n") {
        Err(OpkError::UserConfigError(msg)) => {
            assert!(msg.contains("pm"));
            assert!(msg.contains("package.kdl"));
        }
        other => panic!("expected UserConfigError, got {:?}", other),
    }
}

#[test]
fn unknown_pm_is_rejected() {
    assert!(matches!(
        parse("pm \"cargo\"\n"),
        Err(OpkError::UnknownManager(_))
    ));
}

#[test]
fn unknown_field_is_rejected() {
    let err = parse("pm \"bun\"\nwat \"x\"\n").expect_err("unknown field");
    assert!(err.to_string().contains("wat"));
}

#[test]
fn duplicate_field_is_rejected() {
    let err = parse("pm \"bun\"\npm \"npm\"\n").expect_err("duplicate");
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn wrong_value_types_are_rejected() {
    assert!(parse("pm \"bun\"\nprivate \"yes\"\n").is_err());
    assert!(parse("pm \"bun\"\nversion 1\n").is_err());
    assert!(parse("pm \"bun\"\ntype \"esm\"\n").is_err());
    assert!(parse("pm \"bun\"\nscripts \"build\"\n").is_err());
    assert!(parse("pm \"bun\"\ndependencies { lodash }\n").is_err());
}

#[test]
fn alt_pms_cannot_repeat_primary() {
    assert!(matches!(
        parse("pm \"bun\"\nalt-pms \"bun\"\n"),
        Err(OpkError::UserConfigError(_))
    ));
    assert!(matches!(
        parse("pm \"bun\"\nalt-pms \"npm\" \"npm\"\n"),
        Err(OpkError::UserConfigError(_))
    ));
}

#[test]
fn syntax_error_names_file() {
    match parse("pm \"bun\"\nscripts {\n") {
        Err(OpkError::ParseError { file, .. }) => assert_eq!(file, "package.kdl"),
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn quote_escapes_specials() {
    assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    let doc = parse_document(&format!("k {}\n", quote("tab\there \"q\"")), "x.kdl").expect("valid");
    let value = doc.nodes()[0].entries()[0].value().as_string().map(str::to_string);
    assert_eq!(value.as_deref(), Some("tab\there \"q\""));
}
