#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The source-validity checker.
//!
//! [`SourceChecker`] is the capability a test harness plugs in; [`Linter`] is
//! the implementation. A check reads every file it is given, parses it with
//! the configured dialect, runs the enabled rules, and fails when any
//! error-severity violation is found.

/// Fatal parsing problems.
pub mod dialect;
/// Violation records and reports.
pub mod diagnostics;
/// Check errors.
pub mod error;
/// Lint options and their resolution.
pub mod options;
/// The built-in rule set.
pub mod rules;

use std::fs;

use itertools::Itertools;
use serde_json::Value;

pub use self::{
    diagnostics::{Report, Severity, Violation, ViolationList},
    error::CheckError,
    options::{LintOptions, ResolvedOptions},
    rules::RuleKind,
};
use crate::{
    config,
    constants::PARSE_ERROR_RULE,
    javascript::{Parser, ProjectPaths},
};

/// Anything that can decide whether a set of source files is free of
/// static-analysis violations.
pub trait SourceChecker {
    /// Checks `paths` (relative to the project root, in the order given)
    /// under `options`, a JSON object of lint options.
    ///
    /// Succeeds when no error-severity violation is found. Fails with
    /// [`CheckError::Io`] on the first missing or unreadable file,
    /// [`CheckError::Config`] when the options are malformed, and
    /// [`CheckError::Violations`] with every finding otherwise.
    fn check_files(&self, paths: &[&str], options: &Value) -> Result<Report, CheckError>;
}

impl<T: SourceChecker + ?Sized> SourceChecker for &T {
    fn check_files(&self, paths: &[&str], options: &Value) -> Result<Report, CheckError> {
        (**self).check_files(paths, options)
    }
}

/// Lints JavaScript/JSX sources of one project.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    /// Where sources and the project configuration file are looked up.
    paths: ProjectPaths,
}

impl Linter {
    /// Creates a linter for the project at `paths`.
    pub fn new(paths: ProjectPaths) -> Self {
        Self { paths }
    }

    /// Creates a linter for the project rooted at `root_dir`, using the
    /// default configuration file name.
    pub fn with_root(root_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(ProjectPaths::new(root_dir.into()))
    }

    /// Creates a linter for the project configured through the environment.
    pub fn from_env() -> Self {
        Self::new(config::get().project_paths())
    }

    /// Returns the project paths.
    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Reads the project configuration file, if there is one.
    pub fn project_options(&self) -> Result<Option<LintOptions>, CheckError> {
        let file = self.paths.config_file();
        if !file.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(file).map_err(|source| CheckError::Io {
            path: file.display().to_string(),
            source,
        })?;
        let options = LintOptions::from_json_str(&text).map_err(|e| match e {
            CheckError::Config(message) => {
                CheckError::Config(format!("{}: {message}", file.display()))
            }
            other => other,
        })?;

        tracing::debug!("Loaded project lint configuration from {}", file.display());
        Ok(Some(options))
    }

    /// Resolves `options` on top of the project configuration (unless the
    /// options opt out of it) and the built-in defaults.
    pub fn resolve_options(&self, options: &LintOptions) -> Result<ResolvedOptions, CheckError> {
        let project = if options.uses_project_config() {
            self.project_options()?
        } else {
            None
        };

        match project.as_ref() {
            Some(project) => ResolvedOptions::resolve(&[project, options]),
            None => ResolvedOptions::resolve(&[options]),
        }
    }

    /// Lints source text that was read from `file`. Violations come back in
    /// source order.
    pub fn lint_source(
        &self,
        file: &str,
        code: String,
        resolved: &ResolvedOptions,
    ) -> Result<Vec<Violation>, CheckError> {
        let parser = Parser::new(code)?;

        if let Some(problem) = dialect::fatal_problem(&parser, resolved.dialect())? {
            tracing::debug!("{file} could not be parsed: {}", problem.message);
            return Ok(vec![
                Violation::builder()
                    .file(file)
                    .line(problem.line)
                    .column(problem.column)
                    .rule(PARSE_ERROR_RULE)
                    .severity(Severity::Error)
                    .message(problem.message)
                    .build(),
            ]);
        }

        let mut found = Vec::new();
        for (kind, rule) in resolved.rules() {
            for finding in kind.check(&rule.options, &parser)? {
                found.push((kind, rule.severity, finding));
            }
        }

        Ok(found
            .into_iter()
            .sorted_by_key(|(kind, _, finding)| (finding.line, finding.column, *kind))
            .map(|(kind, severity, finding)| {
                Violation::builder()
                    .file(file)
                    .line(finding.line)
                    .column(finding.column)
                    .rule(kind.id())
                    .severity(severity)
                    .message(finding.message)
                    .build()
            })
            .collect())
    }

    /// Checks `paths` under already-parsed options. See
    /// [`SourceChecker::check_files`].
    pub fn check_with(&self, paths: &[&str], options: &LintOptions) -> Result<Report, CheckError> {
        if paths.is_empty() {
            return Err(CheckError::config("no source files were given to check"));
        }

        let resolved = self.resolve_options(options)?;
        let mut violations = Vec::new();

        for source in paths {
            let path = self.paths.resolve(source);
            let code = fs::read_to_string(&path).map_err(|e| CheckError::Io {
                path:   (*source).to_string(),
                source: e,
            })?;
            let found = self.lint_source(source, code, &resolved)?;
            tracing::debug!("{source}: {} violation(s)", found.len());
            violations.extend(found);
        }

        let list = ViolationList::new(violations);
        tracing::info!(
            "Linted {} file(s): {} error(s), {} warning(s)",
            paths.len(),
            list.error_count(),
            list.warning_count()
        );

        if list.error_count() > 0 {
            Err(CheckError::Violations(list))
        } else {
            Ok(Report {
                files:    paths.iter().map(|p| (*p).to_string()).collect(),
                warnings: list,
            })
        }
    }
}

impl SourceChecker for Linter {
    fn check_files(&self, paths: &[&str], options: &Value) -> Result<Report, CheckError> {
        let options = LintOptions::from_value(options)?;
        self.check_with(paths, &options)
    }
}
