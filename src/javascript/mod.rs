#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! JavaScript-specific parsing and workspace helpers.

/// Tree-sitter parser wrapper for JavaScript/JSX.
pub mod parser;
/// Workspace path configuration.
pub mod paths;
/// Tree-sitter query constants.
pub mod queries;

pub use parser::{Capture, Parser};
pub use paths::ProjectPaths;
