#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Workspace path configuration for a graded JavaScript project.

use std::path::{Path, PathBuf};

use bon::builder;
use serde::{Deserialize, Serialize};

use crate::constants::PROJECT_CONFIG_FILE;

/// Represents the paths the checker resolves sources and configuration
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    /// Root directory of the project workspace; relative source paths are
    /// resolved against it.
    root_dir:    PathBuf,
    /// Project-wide lint configuration file (`.eslintrc.json` by default).
    config_file: PathBuf,
}

impl ProjectPaths {
    /// Creates a new set of workspace paths rooted at `root_dir`.
    pub fn new(root_dir: PathBuf) -> Self {
        Self::build_with_defaults(root_dir, None)
    }

    /// Construct paths from optional overrides.
    pub fn from_parts(root_dir: PathBuf, config_file: Option<PathBuf>) -> Self {
        Self::build_with_defaults(root_dir, config_file)
    }

    /// Root directory for the project.
    pub fn root_dir(&self) -> &Path {
        self.root_dir.as_path()
    }

    /// Location of the project-wide lint configuration file. It may not exist.
    pub fn config_file(&self) -> &Path {
        self.config_file.as_path()
    }

    /// Resolves a source path as supplied by a caller. Absolute paths are kept
    /// as-is, relative ones are joined onto the root directory.
    pub fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    /// Centralized constructor that applies standard defaults when overrides
    /// are absent.
    fn build_with_defaults(root_dir: PathBuf, config_file: Option<PathBuf>) -> Self {
        let config_file = match config_file {
            Some(file) if file.is_absolute() => file,
            Some(file) => root_dir.join(file),
            None => root_dir.join(PROJECT_CONFIG_FILE),
        };

        Self {
            root_dir,
            config_file,
        }
    }
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

/// Builder-friendly constructor for `ProjectPaths` with optional overrides.
#[builder(finish_fn = build)]
pub fn project_paths(
    #[builder(into)] root_dir: PathBuf,
    #[builder(into)] config_file: Option<PathBuf>,
) -> ProjectPaths {
    ProjectPaths::build_with_defaults(root_dir, config_file)
}
