use std::path::Path;

use pakt_core::manifest::AppManifest;
use pakt_registry::memory::MemoryRegistry;
use pakt_resolver::{resolve_remote, DependencyTree, NodeId};
use pakt_util::errors::PaktError;
use semver::Version;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

fn child(tree: &DependencyTree, parent: NodeId, name: &str) -> NodeId {
    tree.children(parent)
        .into_iter()
        .find(|&id| tree.node(id).name == name)
        .unwrap_or_else(|| panic!("{name} is not a child"))
}

fn resolved(tree: &DependencyTree, id: NodeId) -> Version {
    tree.node(id).resolved.clone().unwrap()
}

#[test]
fn test_end_to_end_tree() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[])
        .add_version("lib", "1.2.0", &[("util", "1.0.0")])
        .add_version("lib", "2.0.0", &[])
        .add_version("util", "1.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0").with_dependency("lib", "^1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();

    let root = tree.node(tree.root());
    assert_eq!(root.name, "app");
    assert_eq!(root.resolved, Some(v("1.0.0")));

    let lib = child(tree, tree.root(), "lib");
    assert_eq!(resolved(tree, lib), v("1.2.0"));
    let util = child(tree, lib, "util");
    assert_eq!(resolved(tree, util), v("1.0.0"));
    assert!(tree.children(util).is_empty());
    assert_eq!(tree.len(), 3);

    let rendered = tree.print_tree(None);
    assert_eq!(
        rendered,
        "app@1.0.0\n└── lib@1.2.0 (^1.0.0)\n    └── util@1.0.0\n"
    );
}

#[test]
fn test_exact_pin_skips_version_list() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[])
        .add_version("lib", "1.5.0", &[]);
    let app = AppManifest::new("app", "1.0.0").with_dependency("lib", "1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();
    assert_eq!(resolved(tree, child(tree, tree.root(), "lib")), v("1.0.0"));
    assert_eq!(reg.list_requests("lib"), 0);
    assert_eq!(state.reuse_pool().versions("lib"), &[v("1.0.0")]);
}

#[test]
fn test_overlapping_ranges_reuse_first_choice() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("a", "1.0.0", &[("shared", "^1.0.0")])
        .add_version("b", "1.0.0", &[("shared", ">=1.1.0")])
        .add_version("shared", "1.0.0", &[])
        .add_version("shared", "1.5.0", &[])
        .add_version("shared", "2.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0")
        .with_dependency("a", "1.0.0")
        .with_dependency("b", "1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();
    let a = child(tree, tree.root(), "a");
    let b = child(tree, tree.root(), "b");
    assert_eq!(resolved(tree, child(tree, a, "shared")), v("1.5.0"));
    // 2.0.0 would be the best match, but 1.5.0 was already chosen.
    assert_eq!(resolved(tree, child(tree, b, "shared")), v("1.5.0"));
    assert_eq!(reg.list_requests("shared"), 1);
    assert_eq!(state.reuse_pool().versions("shared"), &[v("1.5.0")]);
}

#[test]
fn test_disjoint_ranges_resolve_separately() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("a", "1.0.0", &[("shared", "^1.0.0")])
        .add_version("b", "1.0.0", &[("shared", "^2.0.0")])
        .add_version("shared", "1.5.0", &[])
        .add_version("shared", "2.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0")
        .with_dependency("a", "1.0.0")
        .with_dependency("b", "1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    assert_eq!(reg.list_requests("shared"), 2);
    assert_eq!(
        state.reuse_pool().versions("shared"),
        &[v("1.5.0"), v("2.0.0")]
    );
}

#[test]
fn test_invalid_root_version() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[]);
    let app = AppManifest::new("app", "not-a-version").with_dependency("lib", "^1.0.0");

    let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
    match err {
        PaktError::InvalidVersion { version } => assert_eq!(version, "not-a-version"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(reg.total_requests(), 0);
}

#[test]
fn test_unparseable_specifier_is_first_error() {
    let mut reg = MemoryRegistry::new();
    reg.set_unavailable("beta", "connection refused");
    let app = AppManifest::new("app", "1.0.0")
        .with_dependency("alpha", "????")
        .with_dependency("beta", "^1.0.0")
        .with_dependency("gamma", "not a range!!");

    let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
    match err {
        PaktError::InvalidVersionExpression { expression } => assert_eq!(expression, "????"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(reg.total_requests(), 0);
}

#[test]
fn test_out_of_range_partial_is_invalid_expression() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[]);
    for spec in ["18446744073709551615", "1.18446744073709551615"] {
        let app = AppManifest::new("app", "1.0.0").with_dependency("lib", spec);
        let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
        match err {
            PaktError::InvalidVersionExpression { expression } => assert_eq!(expression, spec),
            other => panic!("unexpected error for {spec}: {other}"),
        }
    }
    assert_eq!(reg.total_requests(), 0);
}

#[test]
fn test_prefixed_published_versions_match_ranges() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[])
        .add_version("lib", "v1.4.0", &[("util", "1.0.0")])
        .add_version("util", "1.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0").with_dependency("lib", "^1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();
    let lib = child(tree, tree.root(), "lib");
    assert_eq!(resolved(tree, lib), v("1.4.0"));
    assert_eq!(resolved(tree, child(tree, lib, "util")), v("1.0.0"));
}

#[test]
fn test_no_matching_version() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0").with_dependency("lib", "^3.0.0");

    let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
    assert!(matches!(err, PaktError::VersionNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "unable to find suitable version of lib for ^3.0.0"
    );
}

#[test]
fn test_registry_errors_propagate_unchanged() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[("flaky", "^1.0.0")])
        .set_unavailable("flaky", "connection reset");
    let app = AppManifest::new("app", "1.0.0").with_dependency("lib", "1.0.0");

    let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
    assert!(matches!(err, PaktError::Network { .. }));

    let mut reg = MemoryRegistry::new();
    let app = AppManifest::new("app", "1.0.0").with_dependency("ghost", "^1.0.0");
    let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
    assert!(matches!(err, PaktError::PackageNotFound { name } if name == "ghost"));
}

#[test]
fn test_unpublished_pin_fails_on_dependency_fetch() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("lib", "1.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0").with_dependency("lib", "9.9.9");

    let err = resolve_remote(&mut reg, &app, Path::new(".")).unwrap_err();
    assert!(matches!(err, PaktError::Registry { .. }));
}

/// A second occurrence of an identical (name, specifier) pair is resolved
/// from the memo and left without children, even when reached through a
/// different parent. This is kept as-is: the subtree under the first
/// occurrence is the only expansion.
#[test]
fn test_repeated_pair_is_a_reference_leaf() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("a", "1.0.0", &[("shared", "^1.0.0")])
        .add_version("b", "1.0.0", &[("shared", "^1.0.0")])
        .add_version("shared", "1.1.0", &[("leaf", "1.0.0")])
        .add_version("leaf", "1.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0")
        .with_dependency("a", "1.0.0")
        .with_dependency("b", "1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();
    let first = child(tree, child(tree, tree.root(), "a"), "shared");
    let second = child(tree, child(tree, tree.root(), "b"), "shared");

    assert_eq!(resolved(tree, first), resolved(tree, second));
    assert_eq!(tree.children(first).len(), 1);
    assert!(!tree.node(first).reference);
    assert!(tree.children(second).is_empty());
    assert!(tree.node(second).reference);
    assert_eq!(reg.data_requests("leaf"), 1);
    assert!(tree.print_tree(None).contains("shared@1.1.0 (^1.0.0) (*)"));
}

#[test]
fn test_dependency_cycle_terminates() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("ping", "1.0.0", &[("pong", "^1.0.0")])
        .add_version("pong", "1.0.0", &[("ping", "^1.0.0")]);
    let app = AppManifest::new("app", "1.0.0").with_dependency("ping", "^1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();
    let ping = child(tree, tree.root(), "ping");
    let pong = child(tree, ping, "pong");
    let again = child(tree, pong, "ping");
    assert!(tree.node(again).reference);
    assert_eq!(tree.len(), 4);
    assert_eq!(state.memo().len(), 2);
}

#[test]
fn test_same_name_different_specifier_is_expanded() {
    let mut reg = MemoryRegistry::new();
    reg.add_version("a", "1.0.0", &[("shared", "^1.0.0")])
        .add_version("b", "1.0.0", &[("shared", "1.1.0")])
        .add_version("shared", "1.1.0", &[("leaf", "1.0.0")])
        .add_version("leaf", "1.0.0", &[]);
    let app = AppManifest::new("app", "1.0.0")
        .with_dependency("a", "1.0.0")
        .with_dependency("b", "1.0.0");

    let state = resolve_remote(&mut reg, &app, Path::new(".")).unwrap();
    let tree = state.tree();
    let second = child(tree, child(tree, tree.root(), "b"), "shared");
    assert!(!tree.node(second).reference);
    assert_eq!(tree.children(second).len(), 1);
}
