use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

fn cmd() -> Command {
    Command::cargo_bin("fmtcheck").unwrap()
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Assets")).unwrap();
    fs::write(dir.path().join("Assets/Good.cs"), "class Good\n{\n    int x;\n}\n").unwrap();
    dir
}

#[test]
fn clean_project_exits_zero_with_empty_report() {
    let dir = project();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn violations_are_reported_and_fail() {
    let dir = project();
    fs::write(dir.path().join("Assets/Bad.cs"), "line1\r\nline2").unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets", "--threads", "1"])
        .assert()
        .failure()
        .stdout(contains("Bad.cs' has Windows style line ending in line 1"))
        .stdout(contains("Bad.cs' must end with exactly one new line character (found 0)"))
        .stdout(contains("Good.cs").not());
}

#[test]
fn json_format_and_rule_filter() {
    let dir = project();
    fs::write(dir.path().join("Assets/Bad.shader"), "Shader \"X\"\n{\n\t}\n").unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets", "--format", "json", "--rule", "tabs"])
        .assert()
        .failure()
        .stdout(contains("\"rule\":\"tabs\""))
        .stdout(contains("\"line\":3"));
}

#[test]
fn config_file_sets_tab_size() {
    let dir = project();
    fs::write(dir.path().join("Assets/Two.cs"), "a\n  b\n").unwrap();
    cmd().current_dir(dir.path()).args(["check", "--input", "Assets"]).assert().failure();

    fs::write(dir.path().join("fmtcheck.toml"), "tab_size = 2\n").unwrap();
    // Good.cs 的 4 空格缩进也是 2 的倍数
    cmd().current_dir(dir.path()).args(["check", "--input", "Assets"]).assert().success();
}

#[test]
fn unknown_rule_is_an_error() {
    let dir = project();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets", "--rule", "semicolons"])
        .assert()
        .failure()
        .stderr(contains("unknown rule"));
}

#[test]
fn rules_lists_every_rule() {
    cmd()
        .arg("rules")
        .assert()
        .success()
        .stdout(contains("line-endings"))
        .stdout(contains("trailing-whitespace"))
        .stdout(contains("plain-ascii"));
}

#[test]
fn invalid_threads_value_is_an_error() {
    let dir = project();
    for bad in ["0", "abc"] {
        cmd()
            .current_dir(dir.path())
            .args(["check", "--input", "Assets", "--threads", bad])
            .assert()
            .failure()
            .stderr(contains("--threads"));
    }
}

#[test]
fn fused_engine_reports_same_messages() {
    let dir = project();
    fs::write(dir.path().join("Assets/Bad.cs"), "class Bad\n{\n   int x; \n}\n\n").unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets", "--engine", "fused"])
        .assert()
        .failure()
        .stdout(contains("Bad.cs' is not using 4 spaces for indentation in line 3"))
        .stdout(contains("Bad.cs' has trailing whitespace in line 3"))
        .stdout(contains("Bad.cs' must end with exactly one new line character (found 2)"));
}

#[test]
fn output_flag_writes_report_to_file() {
    let dir = project();
    fs::write(dir.path().join("Assets/Bad.cs"), "caf\u{e9}\n").unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets", "--format", "json", "--output", "report.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    let report = fs::read_to_string(dir.path().join("report.json")).unwrap();
    assert!(report.starts_with('['));
    assert!(report.contains("\"rule\":\"plain-ascii\""));
    assert!(report.contains("\"line\":1"));
}

#[test]
fn tab_size_flag_overrides_default() {
    let dir = project();
    fs::write(dir.path().join("Assets/Two.cs"), "a\n  b\n").unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets"])
        .assert()
        .failure()
        .stdout(contains("Two.cs' is not using 4 spaces for indentation in line 2"));
    cmd().current_dir(dir.path()).args(["check", "--input", "Assets", "--tab-size", "2"]).assert().success();
    cmd()
        .current_dir(dir.path())
        .args(["check", "--input", "Assets", "--tab-size", "0"])
        .assert()
        .failure()
        .stderr(contains("--tab-size must be at least 1"));
}
