//! # lintgate
//!
//! A source-validity gate for graded JavaScript/React assignments. Before an
//! assignment's behavioural tests run, its sources are linted; any
//! error-severity violation fails the gate with the full violation list.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Process-wide configuration sourced from the environment
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Test-assertion adapter over the checker
pub mod expect;
/// For parsing JavaScript sources and locating project files
pub mod javascript;
/// The checker, its options, rules and errors
pub mod lint;
/// Assignment gates built on the checker
pub mod suite;
/// Utility functions for convenience
pub mod util;

pub use expect::{AssertionFailure, Expectation, expect, expect_with};
pub use lint::{CheckError, Linter, Report, SourceChecker, Violation, ViolationList};
pub use suite::{GateOutcome, Suite};

/// Defined for convenience
type Dict = std::collections::HashMap<String, String>;
