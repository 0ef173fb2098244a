#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Assignment gates: the lint check an assignment's test suite runs before
//! any behavioural assertion.

use std::path::{Path, PathBuf};

use bon::Builder;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use crate::{
    constants::GATE_SOURCES,
    lint::{CheckError, SourceChecker},
};

/// Names of the built-in assignment gates.
pub const BUILTIN_SUITES: [&str; 2] = ["problem-a", "problem-b"];

#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize)]
#[builder(on(String, into))]
/// The sources one assignment is gated on.
pub struct Suite {
    /// Assignment name.
    name:        String,
    /// Directory holding the sources, relative to the project root.
    #[builder(into)]
    source_root: PathBuf,
    /// Source files under `source_root`, each checked on its own.
    sources:     Vec<String>,
}

impl Suite {
    /// Looks up a built-in gate. Each one checks `index.js` and `App.js`
    /// under `<name>/src`.
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_SUITES.contains(&name).then(|| {
            Suite::builder()
                .name(name)
                .source_root(Path::new(name).join("src"))
                .sources(GATE_SOURCES.iter().map(|s| (*s).to_string()).collect())
                .build()
        })
    }

    /// Every built-in gate.
    pub fn builtins() -> Vec<Self> {
        BUILTIN_SUITES.iter().filter_map(|name| Self::builtin(name)).collect()
    }

    /// Assignment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the sources, relative to the project root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Paths of the gated sources relative to the project root, in check
    /// order.
    pub fn source_paths(&self) -> Vec<String> {
        self.sources
            .iter()
            .map(|source| self.source_root.join(source).display().to_string())
            .collect()
    }

    /// Checks every source on its own, so one bad file does not hide the
    /// verdict on another.
    pub fn run(&self, checker: &impl SourceChecker, options: &Value) -> Vec<GateOutcome> {
        self.source_paths()
            .into_iter()
            .map(|source| {
                let result = checker.check_files(&[source.as_str()], options);
                let outcome = GateOutcome::from_result(source, result);
                if outcome.passed {
                    tracing::debug!("{}: {} passed", self.name, outcome.source);
                } else {
                    tracing::warn!("{}: {} failed ({})", self.name, outcome.source, outcome.reason);
                }
                outcome
            })
            .collect()
    }

    /// Renders outcomes of [`Suite::run`] as a table.
    pub fn outcome_table(&self, outcomes: &[GateOutcome]) -> String {
        let passed = outcomes.iter().filter(|o| o.passed).count();

        Table::new(outcomes)
            .with(Panel::header(format!("Lint gate: {}", self.name)))
            .with(Panel::footer(format!("{passed}/{} source(s) passed", outcomes.len())))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(60).keep_words(true)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
            .to_string()
    }
}

#[derive(Tabled, Debug, Serialize)]
/// Verdict on one gated source.
pub struct GateOutcome {
    #[tabled(rename = "Source")]
    /// * `source`: the source path, relative to the project root
    pub source: String,
    #[tabled(rename = "Passed")]
    /// * `passed`: whether the source has no lint errors
    pub passed: bool,
    #[tabled(rename = "Reason")]
    /// * `reason`: why the source failed, or a note on warnings
    pub reason: String,
    #[tabled(skip)]
    #[serde(skip)]
    /// * `error`: the checker's error, for failed sources
    pub error:  Option<CheckError>,
}

impl GateOutcome {
    /// Summarises one check result.
    pub fn from_result(
        source: String,
        result: Result<crate::lint::Report, CheckError>,
    ) -> Self {
        match result {
            Ok(report) => {
                let reason = match report.warnings.len() {
                    0 => String::new(),
                    n => format!("{n} warning(s)"),
                };
                Self {
                    source,
                    passed: true,
                    reason,
                    error: None,
                }
            }
            Err(error) => {
                let reason = match error.violations() {
                    Some(list) => {
                        let rules = list
                            .iter()
                            .filter(|v| v.severity().is_error())
                            .map(|v| v.rule())
                            .unique()
                            .join(", ");
                        format!("{} error(s): {rules}", list.error_count())
                    }
                    None => format!("{}: {error}", error.kind()),
                };
                Self {
                    source,
                    passed: false,
                    reason,
                    error: Some(error),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_gate_index_and_app() {
        let suite = Suite::builtin("problem-b").expect("builtin");
        assert_eq!(suite.name(), "problem-b");
        assert_eq!(suite.source_paths(), vec![
            Path::new("problem-b/src/index.js").display().to_string(),
            Path::new("problem-b/src/App.js").display().to_string(),
        ]);
        assert!(Suite::builtin("problem-c").is_none());
        assert_eq!(Suite::builtins().len(), 2);
    }

    #[test]
    fn failures_carry_their_kind() {
        let outcome = GateOutcome::from_result(
            "src/App.js".to_string(),
            Err(CheckError::config("rule 'x' unknown")),
        );
        assert!(!outcome.passed);
        assert!(outcome.reason.starts_with("configuration error"));
    }
}
