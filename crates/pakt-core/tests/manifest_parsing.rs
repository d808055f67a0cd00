use pakt_core::manifest::{Manifest, PackageConfig, PackageKind};
use pakt_core::package::LocalPackage;
use tempfile::TempDir;

#[test]
fn test_parse_app_manifest_with_dependencies() {
    let m = Manifest::from_str(
        r#"
[package]
name = "app"
version = "1.0.0"
type = "app"

[dependencies]
lib = "^1.0.0"
util = "1.0.0"
tools = "latest"
"#,
    )
    .unwrap();
    assert_eq!(m.name(), "app");
    assert_eq!(m.version(), "1.0.0");
    assert_eq!(m.kind(), PackageKind::App);
    let names: Vec<&str> = m.dependency_map().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["lib", "tools", "util"]);
}

#[test]
fn test_parse_pkg_manifest() {
    let m = Manifest::from_str(
        r#"
[package]
name = "lib"
version = "1.2.0"
type = "pkg"
authors = ["someone"]
"#,
    )
    .unwrap();
    assert_eq!(m.kind(), PackageKind::Pkg);
    assert!(matches!(m, Manifest::Pkg(_)));
}

#[test]
fn test_manifest_keeps_invalid_version_string() {
    // Version validation belongs to the resolver, not the parser.
    let m = Manifest::from_str(
        r#"
[package]
name = "app"
version = "not-a-version"
"#,
    )
    .unwrap();
    assert_eq!(m.version(), "not-a-version");
}

#[test]
fn test_unknown_kind_is_rejected() {
    let err = Manifest::from_str(
        r#"
[package]
name = "app"
version = "1.0.0"
type = "plugin"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to parse Pakt.toml"));
}

#[test]
fn test_missing_package_section_is_rejected() {
    let err = Manifest::from_str("[dependencies]\nlib = \"1.0.0\"\n").unwrap_err();
    assert!(err.to_string().starts_with("Manifest error"));
}

#[test]
fn test_empty_name_is_rejected() {
    let err = Manifest::from_str(
        r#"
[package]
name = ""
version = "1.0.0"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("name must not be empty"));
}

#[test]
fn test_from_path_and_local_package() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Pakt.toml");
    std::fs::write(
        &path,
        "[package]\nname = \"lib\"\nversion = \"2.0.0\"\ntype = \"pkg\"\n",
    )
    .unwrap();
    let manifest = Manifest::from_path(&path).unwrap();
    let local = LocalPackage::new(true, tmp.path().to_path_buf(), manifest);
    assert_eq!(local.name(), "lib");
    assert_eq!(local.version(), "2.0.0");
    assert_eq!(local.manifest_path(), path);
}

#[test]
fn test_from_path_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = Manifest::from_path(&tmp.path().join("Pakt.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
