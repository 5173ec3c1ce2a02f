use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn exit_code_1_on_pending_rewrites() {
    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/simple",
            "--from",
            ".js",
            "--to",
            ".mjs",
            "--quiet",
        ])
        .assert()
        .code(1);
}

#[test]
fn check_never_touches_files() {
    let before =
        std::fs::read_to_string("tests/fixtures/js/simple/main.js").unwrap();

    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/simple",
            "--from",
            ".js",
            "--to",
            ".mjs",
            "--quiet",
        ])
        .assert()
        .code(1);

    assert_eq!(
        std::fs::read_to_string("tests/fixtures/js/simple/main.js").unwrap(),
        before
    );
}

#[test]
fn exit_code_0_on_clean_tree() {
    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/clean",
            "--from",
            ".js",
            "--to",
            ".mjs",
            "--quiet",
        ])
        .assert()
        .code(0);
}

#[test]
fn exit_code_0_when_no_suffix_matches() {
    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/simple",
            "--from",
            ".xyz",
            "--to",
            ".abc",
            "--quiet",
        ])
        .assert()
        .code(0);
}

#[test]
fn invalid_suffix_is_a_configuration_error() {
    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/simple",
            "--from",
            "js",
            "--to",
            ".mjs",
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn nonexistent_path_fails() {
    Command::cargo_bin("respec")
        .unwrap()
        .args(["check", "/nonexistent/path", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn empty_tree_reports_no_files() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("respec")
        .unwrap()
        .arg("check")
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rewritable files"));
}

#[test]
fn check_emits_json_report() {
    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/simple",
            "--from",
            ".js",
            "--to",
            ".mjs",
            "--quiet",
            "--format",
            "json",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"mode\": \"check\""))
        .stdout(predicate::str::contains("\"files_changed\": 1"));
}

#[test]
fn unparseable_files_do_not_fail_check() {
    Command::cargo_bin("respec")
        .unwrap()
        .args([
            "check",
            "tests/fixtures/js/broken",
            "--from",
            ".js",
            "--to",
            ".mjs",
            "--quiet",
            "--format",
            "json",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"files_skipped\": 1"));
}
