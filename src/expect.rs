#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Test-assertion adapter over [`SourceChecker`].
//!
//! ```no_run
//! use lintgate::expect::expect;
//!
//! expect(&["src/index.js", "src/App.js"])
//!     .to_have_no_lint_errors(&serde_json::json!({}))
//!     .unwrap();
//! ```

use serde_json::Value;

use crate::lint::{CheckError, Linter, Report, SourceChecker};

/// Options meaning "no call-level options".
pub static NO_OPTIONS: Value = Value::Null;

/// A pending assertion about a set of source files.
#[derive(Debug, Clone)]
pub struct Expectation<C = Linter> {
    /// The checker that decides the assertion.
    checker: C,
    /// Sources, as supplied.
    paths:   Vec<String>,
}

/// Starts an assertion about `paths`, checked by a [`Linter`] configured from
/// the environment.
pub fn expect<P: AsRef<str>>(paths: &[P]) -> Expectation {
    Expectation::new(Linter::from_env(), paths)
}

/// Starts an assertion about `paths`, checked by `checker`.
pub fn expect_with<C: SourceChecker, P: AsRef<str>>(checker: C, paths: &[P]) -> Expectation<C> {
    Expectation::new(checker, paths)
}

impl<C: SourceChecker> Expectation<C> {
    /// Creates an assertion about `paths`.
    pub fn new<P: AsRef<str>>(checker: C, paths: &[P]) -> Self {
        Self {
            checker,
            paths: paths.iter().map(|p| p.as_ref().to_string()).collect(),
        }
    }

    /// Sources the assertion is about.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Passes when the sources have no error-severity lint violation under
    /// `options`. The report of a passing check is returned so warnings can
    /// still be inspected.
    pub fn to_have_no_lint_errors(&self, options: &Value) -> Result<Report, AssertionFailure> {
        let paths: Vec<&str> = self.paths.iter().map(String::as_str).collect();
        self.checker
            .check_files(&paths, options)
            .map_err(|error| AssertionFailure {
                paths: self.paths.clone(),
                error,
            })
    }
}

/// A failed [`Expectation`].
#[derive(thiserror::Error, Debug)]
#[error(
    "expected [{}] to have no lint errors, but the check failed with {}:\n{}",
    .paths.join(", "),
    .error.kind(),
    failure_detail(.error)
)]
pub struct AssertionFailure {
    /// Sources the assertion was about.
    paths: Vec<String>,
    /// What the checker reported.
    #[source]
    error: CheckError,
}

impl AssertionFailure {
    /// Short name of the failure kind: `IO error`, `configuration error`,
    /// `lint violations` or `internal error`.
    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }

    /// The checker's error.
    pub fn error(&self) -> &CheckError {
        &self.error
    }

    /// Consumes the failure, returning the checker's error.
    pub fn into_error(self) -> CheckError {
        self.error
    }
}

/// The violation table for lint failures, the cause otherwise.
fn failure_detail(error: &CheckError) -> String {
    match error.violations() {
        Some(list) => list.to_table(),
        None => error.to_string(),
    }
}

/// Panics unless the given sources are free of lint errors.
///
/// Sources resolve against the project root configured through the
/// environment. The optional second argument is a `&serde_json::Value` of lint
/// options.
#[macro_export]
macro_rules! assert_no_lint_errors {
    ($paths:expr) => {
        $crate::assert_no_lint_errors!($paths, &$crate::expect::NO_OPTIONS)
    };
    ($paths:expr, $options:expr) => {
        if let Err(failure) = $crate::expect::expect($paths).to_have_no_lint_errors($options) {
            panic!("{failure}");
        }
    };
}
