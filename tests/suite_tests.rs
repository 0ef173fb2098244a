//! Tests for assignment gates.

use std::path::PathBuf;

use lintgate::{Linter, Suite};
use serde_json::{Value, json};

fn fixtures() -> Linter {
    Linter::with_root(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/javascript"))
}

#[test]
fn builtin_gates_pass_on_reference_solutions() {
    let linter = fixtures();

    for suite in Suite::builtins() {
        let outcomes = suite.run(&linter, &json!({}));
        assert_eq!(outcomes.len(), 2, "{} gates two sources", suite.name());
        for outcome in &outcomes {
            assert!(
                outcome.passed,
                "{} failed: {}",
                outcome.source, outcome.reason
            );
        }
    }
}

#[test]
fn each_source_is_judged_on_its_own() {
    let suite = Suite::builder()
        .name("broken")
        .source_root("broken/src")
        .sources(vec!["index.js".to_string(), "App.js".to_string()])
        .build();

    let outcomes = suite.run(&fixtures(), &Value::Null);
    let verdicts: Vec<bool> = outcomes.iter().map(|o| o.passed).collect();
    assert_eq!(verdicts, vec![true, false]);

    let failed = &outcomes[1];
    assert_eq!(failed.reason, "3 error(s): no-unused-vars, no-debugger");
    let list = failed
        .error
        .as_ref()
        .and_then(|e| e.violations())
        .expect("lint failure");
    let messages: Vec<&str> = list.iter().map(|v| v.message()).collect();
    assert_eq!(messages, vec![
        "'Card' is defined but never used.",
        "'title' is assigned a value but never used.",
        "Unexpected 'debugger' statement.",
    ]);
}

#[test]
fn missing_sources_fail_with_io() {
    let suite = Suite::builder()
        .name("empty")
        .source_root("nowhere/src")
        .sources(vec!["index.js".to_string()])
        .build();

    let outcomes = suite.run(&fixtures(), &json!({}));
    assert!(!outcomes[0].passed);
    assert!(outcomes[0].reason.starts_with("IO error"));
}

#[test]
fn outcome_table_summarises_the_gate() {
    let suite = Suite::builtin("problem-a").expect("builtin");
    let outcomes = suite.run(&fixtures(), &json!({}));
    let table = suite.outcome_table(&outcomes);

    assert!(table.contains("Lint gate: problem-a"));
    assert!(table.contains("2/2 source(s) passed"));
    assert!(table.contains("App.js"));
}
