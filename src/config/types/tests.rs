use super::*;

#[test]
fn kdl_names_round_trip() {
    for kind in DependencyKind::ALL {
        assert_eq!(DependencyKind::from_kdl_name(kind.kdl_name()), Some(kind));
    }
    assert_eq!(DependencyKind::from_kdl_name("devDependencies"), None);
}

#[test]
fn removing_last_entry_drops_the_map() {
    let mut set = DependencySet::default();
    set.insert(DependencyKind::PeerDependencies, "react", "^18");
    assert_eq!(set.count(DependencyKind::PeerDependencies), 1);

    set.remove(DependencyKind::PeerDependencies, "react");
    assert!(set.get(DependencyKind::PeerDependencies).is_none());
    assert_eq!(set, DependencySet::default());
}

#[test]
fn iter_follows_manifest_order_and_skips_empty() {
    let mut set = DependencySet::default();
    set.insert(DependencyKind::OptionalDependencies, "fsevents", "^2");
    set.insert(DependencyKind::Dependencies, "lodash", "^4");
    set.set_map(DependencyKind::DevDependencies, DependencyMap::new());

    let kinds: Vec<_> = set.iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            DependencyKind::Dependencies,
            DependencyKind::OptionalDependencies
        ]
    );
}

#[test]
fn module_type_parses_known_values_only() {
    assert_eq!("module".parse::<ModuleType>(), Ok(ModuleType::Module));
    assert_eq!("commonjs".parse::<ModuleType>(), Ok(ModuleType::CommonJs));
    assert!("esm".parse::<ModuleType>().is_err());
}
