#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The built-in rule set.
//!
//! Rule identifiers and messages follow ESLint's so that students can look a
//! finding up in ESLint's documentation.

/// `no-unreachable`, `no-empty` and `no-cond-assign`.
mod control_flow;
/// `no-dupe-keys` and `no-duplicate-case`.
mod duplicates;
/// `eqeqeq`, `no-console`, `no-var`, `no-debugger` and `no-self-assign`.
mod style;
/// `no-unused-vars`.
mod unused_vars;

use anyhow::Result;
use serde_json::Value;
use tree_sitter::Node;

use super::options::RuleLevel;
use crate::javascript::Parser;

/// Identifies one built-in rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    /// Declared bindings that are never read.
    NoUnusedVars,
    /// `debugger` statements.
    NoDebugger,
    /// Duplicate keys in an object literal.
    NoDupeKeys,
    /// Duplicate `case` labels in a `switch`.
    NoDuplicateCase,
    /// Statements after `return`, `throw`, `break` or `continue`.
    NoUnreachable,
    /// Empty block statements.
    NoEmpty,
    /// Assignments used as conditions.
    NoCondAssign,
    /// Assignments of a value to itself.
    NoSelfAssign,
    /// `==` and `!=`.
    Eqeqeq,
    /// `console.*` calls.
    NoConsole,
    /// `var` declarations.
    NoVar,
}

impl RuleKind {
    /// Every rule, in the order findings of the same position are reported.
    pub const ALL: [RuleKind; 11] = [
        RuleKind::NoUnusedVars,
        RuleKind::NoDebugger,
        RuleKind::NoDupeKeys,
        RuleKind::NoDuplicateCase,
        RuleKind::NoUnreachable,
        RuleKind::NoEmpty,
        RuleKind::NoCondAssign,
        RuleKind::NoSelfAssign,
        RuleKind::Eqeqeq,
        RuleKind::NoConsole,
        RuleKind::NoVar,
    ];

    /// The rule identifier used in configuration and reports.
    pub fn id(self) -> &'static str {
        match self {
            RuleKind::NoUnusedVars => "no-unused-vars",
            RuleKind::NoDebugger => "no-debugger",
            RuleKind::NoDupeKeys => "no-dupe-keys",
            RuleKind::NoDuplicateCase => "no-duplicate-case",
            RuleKind::NoUnreachable => "no-unreachable",
            RuleKind::NoEmpty => "no-empty",
            RuleKind::NoCondAssign => "no-cond-assign",
            RuleKind::NoSelfAssign => "no-self-assign",
            RuleKind::Eqeqeq => "eqeqeq",
            RuleKind::NoConsole => "no-console",
            RuleKind::NoVar => "no-var",
        }
    }

    /// Looks a rule up by identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Level the rule runs at when nothing configures it.
    pub fn default_level(self) -> RuleLevel {
        match self {
            RuleKind::Eqeqeq | RuleKind::NoConsole | RuleKind::NoVar => RuleLevel::Off,
            _ => RuleLevel::Error,
        }
    }

    /// One-line description, for `lintgate rules`.
    pub fn description(self) -> &'static str {
        match self {
            RuleKind::NoUnusedVars => "disallow unused variables",
            RuleKind::NoDebugger => "disallow the use of `debugger`",
            RuleKind::NoDupeKeys => "disallow duplicate keys in object literals",
            RuleKind::NoDuplicateCase => "disallow duplicate case labels",
            RuleKind::NoUnreachable => {
                "disallow unreachable code after `return`, `throw`, `continue`, and `break`"
            }
            RuleKind::NoEmpty => "disallow empty block statements",
            RuleKind::NoCondAssign => "disallow assignment operators in conditional expressions",
            RuleKind::NoSelfAssign => "disallow assignments where both sides are exactly the same",
            RuleKind::Eqeqeq => "require the use of `===` and `!==`",
            RuleKind::NoConsole => "disallow the use of `console`",
            RuleKind::NoVar => "require `let` or `const` instead of `var`",
        }
    }

    /// Parses the options that follow the level in a rule setting.
    ///
    /// Rules without options reject any; the error string is reported as a
    /// configuration error.
    pub fn configure(self, options: &[Value]) -> std::result::Result<RuleOptions, String> {
        match self {
            RuleKind::Eqeqeq => style::eqeqeq_options(options),
            RuleKind::NoConsole => style::no_console_options(options),
            _ if options.is_empty() => Ok(RuleOptions::None),
            _ => Err(format!("rule '{}' does not take options", self.id())),
        }
    }

    /// Runs the rule over a parsed file.
    pub fn check(self, options: &RuleOptions, parser: &Parser) -> Result<Vec<Finding>> {
        match self {
            RuleKind::NoUnusedVars => unused_vars::no_unused_vars(parser),
            RuleKind::NoDebugger => style::no_debugger(parser),
            RuleKind::NoDupeKeys => Ok(duplicates::no_dupe_keys(parser)),
            RuleKind::NoDuplicateCase => Ok(duplicates::no_duplicate_case(parser)),
            RuleKind::NoUnreachable => Ok(control_flow::no_unreachable(parser)),
            RuleKind::NoEmpty => Ok(control_flow::no_empty(parser)),
            RuleKind::NoCondAssign => control_flow::no_cond_assign(parser),
            RuleKind::NoSelfAssign => style::no_self_assign(parser),
            RuleKind::Eqeqeq => Ok(style::eqeqeq(parser, options)),
            RuleKind::NoConsole => style::no_console(parser, options),
            RuleKind::NoVar => style::no_var(parser),
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// How strict `eqeqeq` is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EqeqeqMode {
    /// Every `==` and `!=`.
    #[default]
    Always,
    /// Allows comparing two literals, `typeof` results, and `null`.
    Smart,
}

/// Parsed rule options.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RuleOptions {
    /// The rule takes no options.
    #[default]
    None,
    /// `eqeqeq` options.
    Eqeqeq(EqeqeqMode),
    /// `no-console` options.
    NoConsole {
        /// Console methods that may be called.
        allow: Vec<String>,
    },
}

/// A finding before it is attached to a file and severity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line.
    pub line:    u32,
    /// 1-based column.
    pub column:  u32,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// A finding located at the start of `node`.
    pub fn at(parser: &Parser, node: Node<'_>, message: impl Into<String>) -> Self {
        let (line, column) = parser.position(node);
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// A finding at an explicit position.
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Named children of `node` that are not comments.
pub(crate) fn code_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_rule_round_trips_its_identifier() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(RuleKind::from_id("no-undef"), None);
    }

    #[test]
    fn option_free_rules_reject_options() {
        assert_eq!(RuleKind::NoDebugger.configure(&[]), Ok(RuleOptions::None));
        assert!(RuleKind::NoDebugger.configure(&[json!("always")]).is_err());
    }
}
