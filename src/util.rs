#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::glob;

/// Characters that make a command-line argument a glob pattern.
const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Expands command-line source arguments against `root_dir`.
///
/// Plain paths pass through untouched, so a missing file still reaches the
/// checker and is reported as an IO error. Patterns are matched relative to
/// the root and yield root-relative paths in sorted order; a pattern that
/// matches nothing is an error.
pub fn expand_patterns(root_dir: &Path, args: &[String]) -> Result<Vec<String>> {
    let mut sources = Vec::new();

    for arg in args {
        if !arg.contains(GLOB_CHARS) {
            sources.push(arg.clone());
            continue;
        }

        let pattern = if Path::new(arg).is_absolute() {
            PathBuf::from(arg)
        } else {
            root_dir.join(arg)
        };
        let pattern = pattern
            .to_str()
            .with_context(|| format!("Could not convert pattern `{arg}` to string"))?
            .to_string();

        let mut matched: Vec<String> = glob(&pattern)
            .with_context(|| format!("Invalid glob pattern `{arg}`"))?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .map(|path| {
                path.strip_prefix(root_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or(path)
                    .display()
                    .to_string()
            })
            .collect();

        if matched.is_empty() {
            bail!("No files match `{arg}`");
        }
        matched.sort();
        sources.append(&mut matched);
    }

    Ok(sources)
}
