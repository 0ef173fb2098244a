#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Violation records, the violation list carried by a failed check, and the
//! report returned by a passing one.

use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};
use typed_builder::TypedBuilder;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Severity of a single finding.
pub enum Severity {
    /// Reported, but does not fail the gate.
    Warning,
    /// Fails the gate.
    Error,
}

impl Severity {
    /// Returns the canonical string representation used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Indicates whether the severity represents an error.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            other => Err(de::Error::custom(format!("Unknown violation severity: {other}"))),
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Tabled, Serialize, Deserialize, TypedBuilder, Clone, Debug, PartialEq, Eq)]
#[builder(field_defaults(setter(into)))]
#[builder(doc)]
/// A single static-analysis finding.
pub struct Violation {
    /// * `file`: the file path, exactly as the caller supplied it
    #[tabled(rename = "File")]
    file:     String,
    /// * `line`: 1-based line number
    #[tabled(rename = "Line")]
    line:     u32,
    /// * `column`: 1-based column number
    #[tabled(skip)]
    column:   u32,
    /// * `rule`: identifier of the rule that fired
    #[tabled(rename = "Rule")]
    rule:     String,
    /// * `severity`: whether this finding fails the gate
    #[tabled(skip)]
    severity: Severity,
    /// * `message`: human-readable description
    #[tabled(rename = "Message")]
    message:  String,
}

impl Violation {
    /// Returns the file path as supplied by the caller.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column number.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the rule identifier.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}  {}  {}  ({})",
            self.file, self.line, self.column, self.severity, self.message, self.rule
        )
    }
}

/// Ordered collection of violations across every checked file: input file
/// order first, then source order within a file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    /// Wraps already-ordered violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of error-severity violations.
    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|v| v.severity.is_error()).count()
    }

    /// Number of warning-severity violations.
    pub fn warning_count(&self) -> usize {
        self.len() - self.error_count()
    }

    /// Iterates over the violations in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Borrow the violations as a slice.
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Renders the violations as a table, suitable for a test failure message.
    pub fn to_table(&self) -> String {
        let errors = self.error_count();
        let warnings = self.warning_count();

        Table::new(&self.0)
            .with(Panel::header("Lint violations"))
            .with(Panel::footer(format!("{errors} error(s), {warnings} warning(s)")))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(48).keep_words(true)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
            .to_string()
    }
}

impl Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}

impl IntoIterator for ViolationList {
    type IntoIter = std::vec::IntoIter<Violation>;
    type Item = Violation;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type IntoIter = std::slice::Iter<'a, Violation>;
    type Item = &'a Violation;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a passing check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Files that were read and linted, as supplied.
    pub files:    Vec<String>,
    /// Warning-severity findings; they never fail the gate.
    pub warnings: ViolationList,
}

impl Report {
    /// Returns true when the check produced no findings at all.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
