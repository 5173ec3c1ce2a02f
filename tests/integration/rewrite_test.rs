use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn rewrite_js_fixture_in_place() {
    let dir = crate::copy_fixture("js/simple");

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .args(["--from", ".js", "--to", ".mjs", "--quiet"])
        .assert()
        .success();

    let main = std::fs::read_to_string(dir.path().join("main.js")).unwrap();
    assert_eq!(
        main,
        concat!(
            "import def from './lib/util.mjs';\n",
            "import { one, two } from \"./lib/pair.mjs\";\n",
            "import 'left-pad';\n",
            "export * from './reexport.mjs';\n",
            "\n",
            "console.log(def, one, two);\n",
        )
    );
}

#[test]
fn files_without_local_imports_are_untouched() {
    let dir = crate::copy_fixture("js/simple");
    let before = std::fs::read_to_string(dir.path().join("plain.js")).unwrap();

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .args(["--from", ".js", "--to", ".mjs", "--quiet"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("plain.js")).unwrap(),
        before
    );
}

#[test]
fn identity_remap_of_rewritten_tree_changes_nothing() {
    let dir = crate::copy_fixture("js/simple");

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .args(["--from", ".js", "--to", ".mjs", "--quiet"])
        .assert()
        .success();
    let after_first = std::fs::read_to_string(dir.path().join("main.js")).unwrap();

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .args(["--from", ".mjs", "--to", ".mjs", "--quiet"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("main.js")).unwrap(),
        after_first
    );
}

#[test]
fn rewrite_ts_fixture_with_builtin_defaults() {
    let dir = crate::copy_fixture("ts/simple");

    // No --from/--to and no config file: built-in defaults remap .ts -> .js
    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success();

    let index = std::fs::read_to_string(dir.path().join("index.ts")).unwrap();
    assert_eq!(
        index,
        concat!(
            "import { helper } from './util.js';\n",
            "import type { Shape } from './types.js';\n",
            "export { helper } from './util.js';\n",
            "\n",
            "const s: Shape = helper();\n",
            "export default s;\n",
        )
    );
}

#[test]
fn rewrite_reads_config_file_from_root() {
    let dir = crate::copy_fixture("config_project");

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("entry.js")).unwrap(),
        "import x from './dep.mjs';\nconsole.log(x);\n"
    );
}

#[test]
fn rewrite_emits_json_report() {
    let dir = crate::copy_fixture("js/simple");

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .args(["--from", ".js", "--to", ".mjs", "--quiet", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"rewrite\""))
        .stdout(predicate::str::contains("\"files_changed\": 1"))
        .stdout(predicate::str::contains("\"literals_rewritten\": 3"))
        .stdout(predicate::str::contains("./lib/util.mjs"));
}

#[test]
fn unparseable_files_are_skipped_not_fatal() {
    let dir = crate::copy_fixture("js/broken");

    Command::cargo_bin("respec")
        .unwrap()
        .arg("rewrite")
        .arg(dir.path())
        .args(["--from", ".js", "--to", ".mjs", "--quiet", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"files_skipped\": 1"))
        .stdout(predicate::str::contains("\"files_changed\": 0"));
}
