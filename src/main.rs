#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # lintgate
//!
//! Command-line front end for the source-validity gate.
//!
//! * `lintgate check FILE...` lints the given sources (globs are expanded
//!   against the project root) and exits non-zero when any error-severity
//!   violation is found.
//! * `lintgate suite NAME` runs a built-in assignment gate.
//! * `lintgate rules` lists the rule set and its defaults.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use lintgate::{
    Linter, SourceChecker, Suite,
    lint::RuleKind,
    suite::BUILTIN_SUITES,
    util::expand_patterns,
};
use serde_json::Value;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Lint source files
    Check {
        /// Project root override
        root:    Option<PathBuf>,
        /// Lint options as a JSON object
        options: Option<String>,
        /// Print violations as JSON
        json:    bool,
        /// Sources or glob patterns, relative to the root
        files:   Vec<String>,
    },
    /// Run an assignment gate
    Suite {
        /// Project root override
        root: Option<PathBuf>,
        /// Gate name
        name: String,
    },
    /// List the rule set
    Rules,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the project root override
    fn r() -> impl Parser<Option<PathBuf>> {
        long("root")
            .short('r')
            .help("Project root that relative paths resolve against")
            .argument::<PathBuf>("DIR")
            .optional()
    }

    let root = r();
    let options = long("options")
        .short('o')
        .help("Lint options as a JSON object, e.g. '{\"rules\":{\"no-var\":\"error\"}}'")
        .argument::<String>("JSON")
        .optional();
    let json = long("json")
        .help("Print the violation list as JSON")
        .switch();
    let files = positional::<String>("FILE")
        .help("Source file or glob pattern")
        .many();
    let check = construct!(Cmd::Check {
        root,
        options,
        json,
        files
    })
    .to_options()
    .command("check")
    .help("Lint JavaScript sources");

    let root = r();
    let name = positional::<String>("NAME").help("Assignment gate to run");
    let suite = construct!(Cmd::Suite { root, name })
        .to_options()
        .command("suite")
        .help("Run a built-in assignment gate");

    let rules = pure(Cmd::Rules)
        .to_options()
        .command("rules")
        .help("List the rule set and its defaults");

    let cmd = construct!([check, suite, rules]);

    cmd.to_options()
        .descr("Source-validity gate for graded JavaScript projects")
        .run()
}

/// Picks the linter for an optional root override.
fn linter(root: Option<PathBuf>) -> Linter {
    match root {
        Some(root) => Linter::with_root(root),
        None => Linter::from_env(),
    }
}

/// Runs `lintgate check`.
fn check(
    root: Option<PathBuf>,
    options: Option<String>,
    json: bool,
    files: Vec<String>,
) -> Result<ExitCode> {
    let linter = linter(root);
    let options: Value = match options {
        Some(text) => serde_json::from_str(&text).context("--options is not valid JSON")?,
        None => Value::Null,
    };
    let files = expand_patterns(linter.paths().root_dir(), &files)?;
    let paths: Vec<&str> = files.iter().map(String::as_str).collect();

    match linter.check_files(&paths, &options) {
        Ok(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report.warnings)?);
            } else {
                if !report.warnings.is_empty() {
                    println!("{}", report.warnings);
                }
                eprintln!(
                    "{}",
                    format!("{} file(s) have no lint errors", report.files.len())
                        .green()
                        .bold()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            match (json, e.violations()) {
                (true, Some(list)) => println!("{}", serde_json::to_string_pretty(list)?),
                _ => {
                    eprintln!("{}", format!("Check failed: {}", e.kind()).red().bold());
                    eprintln!("{e}");
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Runs `lintgate suite`.
fn suite(root: Option<PathBuf>, name: String) -> Result<ExitCode> {
    let suite = Suite::builtin(&name).with_context(|| {
        format!("Unknown assignment gate `{name}` (known: {})", BUILTIN_SUITES.join(", "))
    })?;
    let linter = linter(root);

    let outcomes = suite.run(&linter, &Value::Null);
    println!("{}", suite.outcome_table(&outcomes));

    for outcome in &outcomes {
        if let Some(list) = outcome.error.as_ref().and_then(|e| e.violations()) {
            println!("{list}");
        }
    }

    if outcomes.iter().all(|o| o.passed) {
        eprintln!("{}", format!("{} passed the lint gate", suite.name()).green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", format!("{} failed the lint gate", suite.name()).red().bold());
        Ok(ExitCode::FAILURE)
    }
}

/// One row of `lintgate rules`.
#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Rule")]
    /// * `rule`: rule identifier
    rule:        &'static str,
    #[tabled(rename = "Default")]
    /// * `default`: level when unconfigured
    default:     &'static str,
    #[tabled(rename = "Description")]
    /// * `description`: what the rule reports
    description: &'static str,
}

/// Runs `lintgate rules`.
fn rules() -> ExitCode {
    let rows = RuleKind::ALL.into_iter().map(|kind| RuleRow {
        rule:        kind.id(),
        default:     kind.default_level().as_str(),
        description: kind.description(),
    });

    println!(
        "{}",
        Table::new(rows)
            .with(Panel::header("Rules"))
            .with(Style::modern())
    );
    ExitCode::SUCCESS
}

fn main() -> Result<ExitCode> {
    dotenv().ok();

    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Check {
            root,
            options,
            json,
            files,
        } => check(root, options, json, files),
        Cmd::Suite { root, name } => suite(root, name),
        Cmd::Rules => Ok(rules()),
    }
}
