#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Process-wide configuration sourced from the environment.
//!
//! `LINTGATE_ROOT` names the project root that relative source paths resolve
//! against, and `LINTGATE_CONFIG` overrides the project configuration file.
//! Both are read once, on first use.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use anyhow::{Result, bail};

use crate::{
    constants::{CONFIG_FILE_ENV, ROOT_DIR_ENV},
    javascript::ProjectPaths,
};

/// Configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Directory relative source paths resolve against.
    root_dir:    PathBuf,
    /// Project configuration file override, if set.
    config_file: Option<PathBuf>,
}

impl ConfigState {
    /// Reads the environment. Fails when `LINTGATE_ROOT` names something that
    /// is not a directory.
    fn new() -> Result<Self> {
        let root_dir = read_path(ROOT_DIR_ENV).unwrap_or_else(|| PathBuf::from("."));
        if !root_dir.is_dir() {
            bail!(
                "{ROOT_DIR_ENV} is set to `{}`, which is not a directory",
                root_dir.display()
            );
        }

        Ok(Self {
            root_dir,
            config_file: read_path(CONFIG_FILE_ENV),
        })
    }

    /// Returns the project root.
    pub fn root_dir(&self) -> &std::path::Path {
        &self.root_dir
    }

    /// Returns the project configuration file override, if any.
    pub fn config_file(&self) -> Option<&std::path::Path> {
        self.config_file.as_deref()
    }

    /// Project paths for the configured root.
    pub fn project_paths(&self) -> ProjectPaths {
        ProjectPaths::from_parts(self.root_dir.clone(), self.config_file.clone())
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            root_dir:    PathBuf::from("."),
            config_file: None,
        }
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone, Debug)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let mut guard = slot().lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = Arc::new(ConfigState::new()?);
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}

/// Returns the active configuration, initializing it on demand. An invalid
/// environment is logged and replaced by the defaults.
pub fn get() -> ConfigHandle {
    ensure_initialized().unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid environment configuration: {e:#}");
        ConfigHandle(Arc::new(ConfigState::default()))
    })
}

/// Reads a non-empty path from the environment.
fn read_path(env: &str) -> Option<PathBuf> {
    std::env::var(env)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
