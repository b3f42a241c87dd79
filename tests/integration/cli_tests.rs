use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn build_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "game.exe", "binary stub");
    write(
        root,
        "js/main.js",
        r#"const scripts = ["js/plugins.js"]; loadBitmap("Hero");"#,
    );
    write(root, "js/plugins.js", "var $plugins =\n[\n];\n");
    write(root, "img/characters/Hero.png", "png stub");
    write(root, "img/characters/Orphan.png", "png stub");

    dir
}

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("mzsweep")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("unused"));
}

#[test]
fn json_report_lists_the_orphan() {
    let dir = build_project();

    let output = Command::cargo_bin("mzsweep")
        .unwrap()
        .arg(dir.path())
        .args(["--format", "json", "--quiet"])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let unused = report["unused"].as_array().unwrap();
    assert_eq!(unused.len(), 1);
    assert!(unused[0].as_str().unwrap().ends_with("Orphan.png"));
}

#[test]
fn json_report_can_include_references() {
    let dir = build_project();

    let output = Command::cargo_bin("mzsweep")
        .unwrap()
        .arg(dir.path())
        .args(["--format", "json", "--quiet", "--show-references"])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(report["references"].is_object());
}

#[test]
fn dry_run_deletes_nothing() {
    let dir = build_project();

    Command::cargo_bin("mzsweep")
        .unwrap()
        .arg(dir.path())
        .args(["--quiet", "--delete", "--dry-run", "--yes"])
        .assert()
        .success();

    assert!(dir.path().join("img/characters/Orphan.png").exists());
    assert!(dir.path().join("img/characters/Hero.png").exists());
}

#[test]
fn delete_with_yes_removes_only_the_orphan() {
    let dir = build_project();

    Command::cargo_bin("mzsweep")
        .unwrap()
        .arg(dir.path())
        .args(["--quiet", "--delete", "--yes"])
        .assert()
        .success();

    assert!(!dir.path().join("img/characters/Orphan.png").exists());
    assert!(dir.path().join("img/characters/Hero.png").exists());
}

#[test]
fn missing_root_fails_with_a_diagnostic() {
    Command::cargo_bin("mzsweep")
        .unwrap()
        .arg("/no/such/project")
        .assert()
        .failure();
}
