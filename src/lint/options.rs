#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Lint options as callers (and the project configuration file) supply them,
//! and their resolution into the settings one check runs with.
//!
//! The accepted shape follows ESLint's:
//!
//! ```json
//! {
//!   "rules": { "no-unused-vars": "error", "eqeqeq": ["warn", "smart"] },
//!   "parserOptions": { "sourceType": "module", "ecmaVersion": 2018, "ecmaFeatures": { "jsx": true } },
//!   "useEslintrc": true
//! }
//! ```
//!
//! Keys that are not recognised are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use super::{
    diagnostics::Severity,
    error::CheckError,
    rules::{RuleKind, RuleOptions},
};
use crate::constants::LATEST_ECMA_VERSION;

/// How strongly a rule is enabled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleLevel {
    /// Rule does not run.
    Off,
    /// Findings are reported as warnings.
    Warn,
    /// Findings are reported as errors.
    Error,
}

impl RuleLevel {
    /// Severity findings are reported with, or `None` when the rule is off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warn => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }

    /// Returns the canonical string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Levels may be given by name or by ESLint's numeric shorthand.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            /// `0`, `1` or `2`.
            Number(u64),
            /// `"off"`, `"warn"` or `"error"`.
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(0) => Ok(RuleLevel::Off),
            Raw::Number(1) => Ok(RuleLevel::Warn),
            Raw::Number(2) => Ok(RuleLevel::Error),
            Raw::Name(name) => match name.as_str() {
                "off" => Ok(RuleLevel::Off),
                "warn" => Ok(RuleLevel::Warn),
                "error" => Ok(RuleLevel::Error),
                other => Err(de::Error::custom(format!(
                    "unknown rule severity `{other}` (expected \"off\", \"warn\" or \"error\")"
                ))),
            },
            Raw::Number(other) => Err(de::Error::custom(format!(
                "unknown rule severity `{other}` (expected 0, 1 or 2)"
            ))),
        }
    }
}

/// A rule entry under `rules`: either a bare level or `[level, ...options]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSetting {
    /// The requested level.
    level:   RuleLevel,
    /// Rule-specific options following the level, if any.
    options: Vec<Value>,
}

impl RuleSetting {
    /// A setting with no rule options.
    pub fn new(level: RuleLevel) -> Self {
        Self {
            level,
            options: Vec::new(),
        }
    }

    /// A setting with rule options.
    pub fn with_options(level: RuleLevel, options: Vec<Value>) -> Self {
        Self { level, options }
    }

    /// Returns the level.
    pub fn level(&self) -> RuleLevel {
        self.level
    }

    /// Returns the rule options.
    pub fn options(&self) -> &[Value] {
        &self.options
    }
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Either form ESLint accepts for a rule entry.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            /// `"error"`
            Level(RuleLevel),
            /// `["error", { ... }]`
            List(Vec<Value>),
        }

        match Raw::deserialize(deserializer) {
            Ok(Raw::Level(level)) => Ok(RuleSetting::new(level)),
            Ok(Raw::List(mut items)) => {
                if items.is_empty() {
                    return Err(de::Error::custom("rule setting array must start with a severity"));
                }
                let level = RuleLevel::deserialize(items.remove(0)).map_err(de::Error::custom)?;
                Ok(RuleSetting::with_options(level, items))
            }
            Err(_) => Err(de::Error::custom(
                "rule setting must be a severity or an array starting with one",
            )),
        }
    }
}

/// Whether a file is parsed as an ES module or a classic script.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// `import`/`export` allowed.
    #[default]
    Module,
    /// `import`/`export` are parse errors.
    Script,
}

/// A validated ECMAScript edition, normalised to its year.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EcmaVersion(u32);

impl EcmaVersion {
    /// The newest edition the parser understands.
    pub const LATEST: EcmaVersion = EcmaVersion(LATEST_ECMA_VERSION);

    /// Normalises an edition number (`3`, `5`, `6`..`17`) or year (`2015`..)
    /// to a year. Returns `None` for anything ESLint would reject.
    pub fn from_number(value: u64) -> Option<Self> {
        let latest = u64::from(LATEST_ECMA_VERSION);
        let edition_cap = latest - 2009;
        match value {
            3 | 5 => Some(EcmaVersion(value as u32)),
            v if (6..=edition_cap).contains(&v) => Some(EcmaVersion((v + 2009) as u32)),
            v if (2015..=latest).contains(&v) => Some(EcmaVersion(v as u32)),
            _ => None,
        }
    }

    /// The normalised value: 3, 5, or a year from 2015 on.
    pub fn year(self) -> u32 {
        self.0
    }

    /// Whether syntax introduced in the edition of `year` is available.
    pub fn supports(self, year: u32) -> bool {
        self.0 >= year
    }
}

impl Default for EcmaVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl<'de> Deserialize<'de> for EcmaVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// A number or the string `"latest"`.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            /// Edition or year.
            Number(u64),
            /// Only `"latest"` is accepted.
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => EcmaVersion::from_number(n)
                .ok_or_else(|| de::Error::custom(format!("unsupported ecmaVersion `{n}`"))),
            Raw::Name(name) if name == "latest" => Ok(EcmaVersion::LATEST),
            Raw::Name(name) => Err(de::Error::custom(format!("unsupported ecmaVersion `{name}`"))),
        }
    }
}

/// `parserOptions.ecmaFeatures`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EcmaFeatures {
    /// Whether JSX is accepted.
    #[serde(default)]
    pub jsx: Option<bool>,
}

/// `parserOptions`: the parsing dialect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    /// Module or script.
    #[serde(default)]
    pub source_type:   Option<SourceType>,
    /// ECMAScript edition.
    #[serde(default)]
    pub ecma_version:  Option<EcmaVersion>,
    /// Optional language features.
    #[serde(default)]
    pub ecma_features: Option<EcmaFeatures>,
}

/// One layer of lint options, as supplied by a caller or read from the
/// project configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintOptions {
    /// Per-rule settings keyed by rule identifier.
    #[serde(default)]
    pub rules:          BTreeMap<String, RuleSetting>,
    /// Parsing dialect.
    #[serde(default)]
    pub parser_options: ParserOptions,
    /// Whether the project configuration file is merged underneath these
    /// options. Defaults to true.
    #[serde(default)]
    pub use_eslintrc:   Option<bool>,
}

impl LintOptions {
    /// Reads options from a JSON value. `null` means "no options"; anything
    /// else that is not an object is a configuration error.
    pub fn from_value(value: &Value) -> Result<Self, CheckError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|e| CheckError::config(e.to_string())),
            other => Err(CheckError::config(format!(
                "lint options must be a JSON object, got `{other}`"
            ))),
        }
    }

    /// Parses options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CheckError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CheckError::config(format!("lint options are not valid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Whether the project configuration file should be merged underneath.
    pub fn uses_project_config(&self) -> bool {
        self.use_eslintrc.unwrap_or(true)
    }
}

/// The parsing dialect a check runs with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dialect {
    /// Module or script.
    pub source_type:  SourceType,
    /// ECMAScript edition.
    pub ecma_version: EcmaVersion,
    /// Whether JSX is accepted.
    pub jsx:          bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            source_type:  SourceType::Module,
            ecma_version: EcmaVersion::LATEST,
            jsx:          true,
        }
    }
}

/// An enabled rule with its severity and parsed options.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveRule {
    /// Severity findings are reported with.
    pub severity: Severity,
    /// Parsed rule options.
    pub options:  RuleOptions,
}

/// Fully resolved settings for one check: every enabled rule and the dialect.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    /// Enabled rules, in rule order.
    rules:   BTreeMap<RuleKind, ActiveRule>,
    /// Parsing dialect.
    dialect: Dialect,
}

impl ResolvedOptions {
    /// Applies `layers` in order (later layers win) on top of the built-in
    /// defaults.
    ///
    /// A layer that only changes a rule's level keeps the options an earlier
    /// layer gave it.
    pub fn resolve(layers: &[&LintOptions]) -> Result<Self, CheckError> {
        let mut table: BTreeMap<RuleKind, (RuleLevel, RuleOptions)> = BTreeMap::new();
        for kind in RuleKind::ALL {
            let options = kind.configure(&[]).map_err(CheckError::Config)?;
            table.insert(kind, (kind.default_level(), options));
        }
        let mut dialect = Dialect::default();

        for layer in layers {
            for (id, setting) in &layer.rules {
                let kind = RuleKind::from_id(id).ok_or_else(|| {
                    CheckError::config(format!("Definition for rule '{id}' was not found"))
                })?;
                let entry = table
                    .get_mut(&kind)
                    .ok_or_else(|| CheckError::config(format!("rule '{id}' has no defaults")))?;
                entry.0 = setting.level();
                if !setting.options().is_empty() {
                    entry.1 = kind
                        .configure(setting.options())
                        .map_err(|e| CheckError::config(format!("rule '{id}': {e}")))?;
                }
            }

            let parser = &layer.parser_options;
            if let Some(source_type) = parser.source_type {
                dialect.source_type = source_type;
            }
            if let Some(version) = parser.ecma_version {
                dialect.ecma_version = version;
            }
            if let Some(jsx) = parser.ecma_features.as_ref().and_then(|f| f.jsx) {
                dialect.jsx = jsx;
            }
        }

        let rules = table
            .into_iter()
            .filter_map(|(kind, (level, options))| {
                level
                    .severity()
                    .map(|severity| (kind, ActiveRule { severity, options }))
            })
            .collect();

        Ok(Self { rules, dialect })
    }

    /// Enabled rules, in rule order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleKind, &ActiveRule)> {
        self.rules.iter().map(|(kind, rule)| (*kind, rule))
    }

    /// Returns the active settings of `kind`, if enabled.
    pub fn rule(&self, kind: RuleKind) -> Option<&ActiveRule> {
        self.rules.get(&kind)
    }

    /// Returns the parsing dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_object_resolves_to_defaults() {
        let options = LintOptions::from_value(&json!({})).expect("empty options");
        let resolved = ResolvedOptions::resolve(&[&options]).expect("resolve");

        assert_eq!(resolved.dialect(), Dialect::default());
        assert!(resolved.rule(RuleKind::NoUnusedVars).is_some());
        assert!(resolved.rule(RuleKind::NoConsole).is_none());
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let options =
            LintOptions::from_value(&json!({ "fix": true, "cwd": "/tmp" })).expect("options");
        assert_eq!(options, LintOptions::default());
    }

    #[test]
    fn numeric_and_array_levels_are_accepted() {
        let options = LintOptions::from_value(&json!({
            "rules": { "no-debugger": 0, "eqeqeq": ["warn", "smart"], "no-var": 2 }
        }))
        .expect("options");
        let resolved = ResolvedOptions::resolve(&[&options]).expect("resolve");

        assert!(resolved.rule(RuleKind::NoDebugger).is_none());
        assert_eq!(
            resolved.rule(RuleKind::Eqeqeq).map(|r| r.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            resolved.rule(RuleKind::NoVar).map(|r| r.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn later_layer_keeps_options_when_only_level_changes() {
        let base = LintOptions::from_value(&json!({ "rules": { "eqeqeq": ["warn", "smart"] } }))
            .expect("base");
        let top =
            LintOptions::from_value(&json!({ "rules": { "eqeqeq": "error" } })).expect("top");
        let resolved = ResolvedOptions::resolve(&[&base, &top]).expect("resolve");
        let base_only = ResolvedOptions::resolve(&[&base]).expect("resolve base");

        let merged = resolved.rule(RuleKind::Eqeqeq).expect("eqeqeq enabled");
        assert_eq!(merged.severity, Severity::Error);
        assert_eq!(
            Some(&merged.options),
            base_only.rule(RuleKind::Eqeqeq).map(|r| &r.options)
        );
    }

    #[test]
    fn malformed_options_are_config_errors() {
        let cases = [
            json!([1, 2, 3]),
            json!({ "rules": { "no-such-rule": "error" } }),
            json!({ "rules": { "no-debugger": "loud" } }),
            json!({ "rules": { "no-debugger": 7 } }),
            json!({ "rules": { "no-debugger": [] } }),
            json!({ "rules": "all" }),
            json!({ "parserOptions": { "sourceType": "commonjs" } }),
            json!({ "parserOptions": { "ecmaVersion": 4 } }),
            json!({ "parserOptions": { "ecmaVersion": "next" } }),
        ];

        for case in cases {
            let result = LintOptions::from_value(&case)
                .and_then(|options| ResolvedOptions::resolve(&[&options]).map(|_| ()));
            assert!(
                matches!(result, Err(CheckError::Config(_))),
                "expected a configuration error for {case}"
            );
        }
    }

    #[test]
    fn ecma_versions_normalise_to_years() {
        assert_eq!(EcmaVersion::from_number(6).map(EcmaVersion::year), Some(2015));
        assert_eq!(EcmaVersion::from_number(2018).map(EcmaVersion::year), Some(2018));
        assert_eq!(EcmaVersion::from_number(5).map(EcmaVersion::year), Some(5));
        assert!(!EcmaVersion(5).supports(2015));
        assert!(EcmaVersion(2020).supports(2017));
        assert!(EcmaVersion::from_number(4).is_none());
        assert!(EcmaVersion::from_number(1999).is_none());
    }

    #[test]
    fn dialect_layers_override_individually() {
        let base = LintOptions::from_value(&json!({
            "parserOptions": { "sourceType": "script", "ecmaFeatures": { "jsx": false } }
        }))
        .expect("base");
        let top = LintOptions::from_value(&json!({ "parserOptions": { "sourceType": "module" } }))
            .expect("top");
        let dialect = ResolvedOptions::resolve(&[&base, &top])
            .expect("resolve")
            .dialect();

        assert_eq!(dialect.source_type, SourceType::Module);
        assert!(!dialect.jsx);
    }
}
