use fmtcheck_core::{
    check_file, check_paths, run_all_rules, CheckEngine, CheckError, CheckOptions, ConfigError, RuleKind, Violation,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

fn write_pair() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("A.txt");
    let b = dir.path().join("B.txt");
    fs::write(&a, "line1\nline2\n").unwrap();
    fs::write(&b, "line1\r\nline2").unwrap();
    (dir, a, b)
}

#[test]
fn six_rules_over_two_files_yield_two_failures_for_b() {
    let (_dir, a, b) = write_pair();
    let paths = vec![a, b.clone()];

    let tab_size = NonZeroUsize::new(4).unwrap();
    let mut failures: Vec<CheckError> = Vec::new();
    for rule in RuleKind::ALL {
        failures.extend(run_all_rules(&paths, |p| check_file(p, rule, tab_size)));
    }

    let violations: Vec<Violation> = failures.iter().filter_map(|e| e.violation().cloned()).collect();
    assert_eq!(
        violations,
        vec![
            Violation::WindowsLineEnding { path: b.clone(), line: 1 },
            Violation::FinalNewlineCount { path: b, actual_count: 0 },
        ]
    );
    assert_eq!(failures.len(), 2);
}

#[test]
fn checker_agrees_for_both_engines() {
    let (_dir, a, b) = write_pair();
    let paths = vec![a, b.clone()];

    for engine in [CheckEngine::PerRule, CheckEngine::Fused] {
        let opts = CheckOptions { engine, threads: Some(2), ..CheckOptions::default() };
        let report = check_paths(&paths, &opts).unwrap();
        let got: Vec<_> = report.findings.iter().map(|f| (f.file_index, f.rule)).collect();
        assert_eq!(got, vec![(1, RuleKind::LineEndings), (1, RuleKind::FinalNewline)]);
        assert!(report.findings.iter().all(|f| f.error.path() == b.as_path()));
    }
}

#[test]
fn clean_tree_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("Clean.cs");
    fs::write(&p, "namespace N\n{\n    class C\n    {\n    }\n}\n").unwrap();
    let report = check_paths(&[p], &CheckOptions::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.stats.failures, 0);
}

#[test]
fn zero_tab_size_is_an_error_not_a_panic() {
    let (_dir, a, _b) = write_pair();
    for engine in [CheckEngine::PerRule, CheckEngine::Fused] {
        let opts = CheckOptions { tab_size: 0, engine, threads: Some(1), ..CheckOptions::default() };
        let err = check_paths(&[a.clone()], &opts).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::InvalidTabSize)));
    }
}
