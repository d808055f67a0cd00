use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn pakt_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pakt").unwrap();
    cmd.env("HOME", home)
        .env_remove("PAKT_REGISTRY")
        .env_remove("PAKT_OFFLINE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_package(dir: &Path, name: &str, version: &str, kind: &str, deps: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("Pakt.toml"),
        format!(
            "[package]\nname = \"{name}\"\nversion = \"{version}\"\ntype = \"{kind}\"\n\n[dependencies]\n{deps}"
        ),
    )
    .unwrap();
}

#[test]
fn test_tree_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    pakt_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find Pakt.toml"));
}

#[test]
fn test_tree_without_dependencies() {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "app", "1.0.0", "app", "");

    pakt_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout("app@1.0.0\n");
}

#[test]
fn test_tree_with_invalid_root_version() {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "app", "not-a-version", "app", "lib = \"^1.0.0\"\n");

    pakt_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid version not-a-version"));
}

#[test]
fn test_tree_with_bad_specifier() {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "app", "1.0.0", "app", "lib = \"????\"\n");

    pakt_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid version expression ????"));
}

#[test]
fn test_tree_resolves_vendored_packages_from_subdirectory() {
    let tmp = TempDir::new().unwrap();
    write_package(tmp.path(), "app", "1.0.0", "app", "fmt = \"0.9.0\"\n");
    write_package(
        &tmp.path().join("vendor").join("fmt"),
        "fmt",
        "0.9.0",
        "pkg",
        "",
    );
    let nested = tmp.path().join("src");
    fs::create_dir_all(&nested).unwrap();

    pakt_cmd(tmp.path())
        .current_dir(&nested)
        .args(["tree", "--offline"])
        .assert()
        .success()
        .stdout("app@1.0.0\n└── fmt@0.9.0\n");

    pakt_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree", "--offline", "--why", "fmt"])
        .assert()
        .success()
        .stdout("Path to fmt:\napp@1.0.0\n  fmt@0.9.0\n");
}
