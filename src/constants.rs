#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Name of the project-wide lint configuration file looked up in the project
/// root.
pub const PROJECT_CONFIG_FILE: &str = ".eslintrc.json";

/// Environment variable that overrides the project root directory.
pub const ROOT_DIR_ENV: &str = "LINTGATE_ROOT";

/// Environment variable that overrides the project configuration file name.
pub const CONFIG_FILE_ENV: &str = "LINTGATE_CONFIG";

/// Rule identifier attached to fatal parsing problems. It is not a
/// configurable rule and cannot be turned off.
pub const PARSE_ERROR_RULE: &str = "parse-error";

/// Source files each assignment gate lints, relative to the assignment's
/// source root.
pub const GATE_SOURCES: [&str; 2] = ["index.js", "App.js"];

/// Sentinel for `ecmaVersion: "latest"`.
pub const LATEST_ECMA_VERSION: u32 = 2026;
