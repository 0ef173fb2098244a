#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Errors a source check can end with.

use super::diagnostics::ViolationList;

/// Why a source check did not pass. The kinds stay distinguishable so a
/// failing test can say which one happened.
#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    /// A source (or the project configuration file) is missing or unreadable.
    #[error("could not read `{path}`: {source}")]
    Io {
        /// The path as supplied by the caller.
        path:   String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The lint options are malformed.
    #[error("invalid lint configuration: {0}")]
    Config(String),
    /// The files were read and parsed, and the analysis found problems.
    #[error("found {count} lint violation(s):\n{list}", count = .0.len(), list = .0)]
    Violations(ViolationList),
    /// The checker itself failed, for example a rule query did not compile.
    #[error("internal checker failure: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl CheckError {
    /// Short name of the failure kind, for assertion messages.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Io { .. } => "IO error",
            CheckError::Config(_) => "configuration error",
            CheckError::Violations(_) => "lint violations",
            CheckError::Internal(_) => "internal error",
        }
    }

    /// Returns the violation list when the failure is a lint failure.
    pub fn violations(&self) -> Option<&ViolationList> {
        match self {
            CheckError::Violations(list) => Some(list),
            _ => None,
        }
    }

    /// Builds a configuration error from anything printable.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        CheckError::Config(message.into())
    }
}
