mod common;

use assert_cmd::Command;
use common::{create_fixture, ROOT_INDEX};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_flag() {
    Command::cargo_bin("dirindex")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("per-directory markdown index files"))
        .stdout(predicate::str::contains("--prefix"))
        .stdout(predicate::str::contains("--include"))
        .stdout(predicate::str::contains("--ignore"))
        .stdout(predicate::str::contains("--once"))
        .stdout(predicate::str::contains("--debounce"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("dirindex")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dirindex"));
}

#[test]
fn test_nonexistent_path_exits_with_error() {
    Command::cargo_bin("dirindex")
        .unwrap()
        .arg("/this/path/does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to resolve path"));
}

#[test]
fn test_file_path_exits_with_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("afile.txt");
    std::fs::write(&file, "hello").unwrap();

    Command::cargo_bin("dirindex")
        .unwrap()
        .arg(file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_once_builds_indexes_and_exits() {
    let vault = create_fixture(&["A/x.md", "B/"]);

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--quiet"])
        .arg(&vault.root)
        .assert()
        .success();

    assert!(vault.exists(ROOT_INDEX));
    assert!(vault.links("A/_Index_of_A.md").contains(&"[[A/x.md]]".to_string()));
    assert!(vault.exists("B/_Index_of_B.md"));
}

#[test]
fn test_save_config_persists_overrides() {
    let vault = create_fixture(&["A/x.md"]);

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--quiet", "--save-config", "-p", "IDX_"])
        .arg(&vault.root)
        .assert()
        .success();

    let saved = vault.read(".dirindex.toml");
    assert!(saved.contains("IDX_"), "saved config: {saved}");
    assert!(vault.exists("A/IDX_A.md"));

    // A later run picks the prefix up from the file.
    std::fs::remove_file(vault.path("A/IDX_A.md")).unwrap();
    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--quiet"])
        .arg(&vault.root)
        .assert()
        .success();
    assert!(vault.exists("A/IDX_A.md"));
    assert!(!vault.exists("A/_Index_of_A.md"));
}

#[test]
fn test_saved_config_file_is_not_indexed() {
    let vault = create_fixture(&["A/x.md"]);

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--quiet", "--save-config"])
        .arg(&vault.root)
        .assert()
        .success();

    assert!(vault.exists(".dirindex.toml"));
    assert_eq!(vault.links(ROOT_INDEX), vec!["[[A]]".to_string()]);
    assert_eq!(vault.index_files("_Index_of_").len(), 2);
}

#[test]
fn test_prefix_flag_overrides_invalid_config_value() {
    let vault = create_fixture(&["A/x.md"]);
    std::fs::write(vault.path(".dirindex.toml"), "index_prefix = \"\"\n").unwrap();

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--quiet", "-p", "IDX_"])
        .arg(&vault.root)
        .assert()
        .success();

    assert!(vault.exists("A/IDX_A.md"));
}

#[test]
fn test_invalid_config_value_without_override_fails() {
    let vault = create_fixture(&[]);
    std::fs::write(vault.path(".dirindex.toml"), "index_prefix = \"\"\n").unwrap();

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once"])
        .arg(&vault.root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("index prefix must not be empty"));
}

#[test]
fn test_empty_prefix_is_rejected() {
    let vault = create_fixture(&[]);

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--prefix", ""])
        .arg(&vault.root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("index prefix must not be empty"));
}

#[test]
fn test_include_flag_limits_indexing() {
    let vault = create_fixture(&["Projects/a.md", "Archive/b.md"]);

    Command::cargo_bin("dirindex")
        .unwrap()
        .args(["--once", "--quiet", "--include", "Projects"])
        .arg(&vault.root)
        .assert()
        .success();

    assert!(vault.exists("Projects/_Index_of_Projects.md"));
    assert!(!vault.exists("Archive/_Index_of_Archive.md"));
    assert!(!vault.exists(ROOT_INDEX));
}
