//! Rules that flag individual constructs: `eqeqeq`, `no-console`, `no-var`,
//! `no-debugger` and `no-self-assign`.

use anyhow::Result;
use serde_json::Value;
use tree_sitter::Node;

use super::{EqeqeqMode, Finding, RuleOptions};
use crate::javascript::{
    Parser,
    queries::{CONSOLE_CALL_QUERY, DEBUGGER_QUERY, SELF_ASSIGN_QUERY, VAR_DECLARATION_QUERY},
};

/// Node kinds `eqeqeq` in smart mode treats as literals.
const LITERAL_KINDS: [&str; 6] = ["string", "number", "true", "false", "null", "regex"];

/// Parses `eqeqeq` options: nothing, `"always"` or `"smart"`.
pub(super) fn eqeqeq_options(options: &[Value]) -> Result<RuleOptions, String> {
    match options {
        [] => Ok(RuleOptions::Eqeqeq(EqeqeqMode::Always)),
        [Value::String(mode)] if mode == "always" => Ok(RuleOptions::Eqeqeq(EqeqeqMode::Always)),
        [Value::String(mode)] if mode == "smart" => Ok(RuleOptions::Eqeqeq(EqeqeqMode::Smart)),
        other => Err(format!(
            "expected \"always\" or \"smart\", got {}",
            Value::Array(other.to_vec())
        )),
    }
}

/// Parses `no-console` options: nothing, or `{ "allow": ["warn", ...] }`.
pub(super) fn no_console_options(options: &[Value]) -> Result<RuleOptions, String> {
    match options {
        [] => Ok(RuleOptions::NoConsole { allow: Vec::new() }),
        [Value::Object(map)] => {
            let allow = match map.get("allow") {
                None => Vec::new(),
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| format!("`allow` entries must be strings, got {item}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Some(other) => return Err(format!("`allow` must be an array, got {other}")),
            };
            Ok(RuleOptions::NoConsole { allow })
        }
        other => Err(format!(
            "expected an object like {{ \"allow\": [...] }}, got {}",
            Value::Array(other.to_vec())
        )),
    }
}

/// `debugger` statements.
pub(super) fn no_debugger(parser: &Parser) -> Result<Vec<Finding>> {
    Ok(parser
        .query_captures(DEBUGGER_QUERY, "statement")?
        .into_iter()
        .map(|c| Finding::new(c.line, c.column, "Unexpected 'debugger' statement."))
        .collect())
}

/// `var` declarations.
pub(super) fn no_var(parser: &Parser) -> Result<Vec<Finding>> {
    Ok(parser
        .query_captures(VAR_DECLARATION_QUERY, "declaration")?
        .into_iter()
        .map(|c| Finding::new(c.line, c.column, "Unexpected var, use let or const instead."))
        .collect())
}

/// `x = x` and `a.b = a.b`.
pub(super) fn no_self_assign(parser: &Parser) -> Result<Vec<Finding>> {
    Ok(parser
        .query_captures(SELF_ASSIGN_QUERY, "right")?
        .into_iter()
        .map(|c| Finding::new(c.line, c.column, format!("'{}' is assigned to itself.", c.text)))
        .collect())
}

/// `console.*(...)` calls whose method is not allowed.
pub(super) fn no_console(parser: &Parser, options: &RuleOptions) -> Result<Vec<Finding>> {
    let allow: &[String] = match options {
        RuleOptions::NoConsole { allow } => allow,
        _ => &[],
    };

    let mut findings = Vec::new();
    for captures in parser.query_matches(CONSOLE_CALL_QUERY)? {
        let (Some(call), Some(method)) = (captures.get("call"), captures.get("method")) else {
            continue;
        };
        if allow.iter().any(|m| *m == method.text) {
            continue;
        }
        findings.push(Finding::new(call.line, call.column, "Unexpected console statement."));
    }
    Ok(findings)
}

/// `==` and `!=`, minus the smart-mode exemptions.
pub(super) fn eqeqeq(parser: &Parser, options: &RuleOptions) -> Vec<Finding> {
    let mode = match options {
        RuleOptions::Eqeqeq(mode) => *mode,
        _ => EqeqeqMode::Always,
    };

    parser
        .descendants()
        .into_iter()
        .filter(|node| node.kind() == "binary_expression")
        .filter_map(|node| {
            let operator = node.child_by_field_name("operator")?;
            let expected = match operator.kind() {
                "==" => "===",
                "!=" => "!==",
                _ => return None,
            };
            if mode == EqeqeqMode::Smart && smart_exempt(node) {
                return None;
            }
            Some(Finding::at(
                parser,
                operator,
                format!("Expected '{expected}' and instead saw '{}'.", operator.kind()),
            ))
        })
        .collect()
}

/// Whether a comparison is allowed under `eqeqeq: "smart"`.
fn smart_exempt(comparison: Node<'_>) -> bool {
    let (Some(left), Some(right)) = (
        comparison.child_by_field_name("left"),
        comparison.child_by_field_name("right"),
    ) else {
        return false;
    };

    let is_typeof = |node: Node<'_>| {
        node.kind() == "unary_expression"
            && node
                .child_by_field_name("operator")
                .is_some_and(|op| op.kind() == "typeof")
    };
    let is_literal = |node: Node<'_>| LITERAL_KINDS.contains(&node.kind());

    is_typeof(left)
        || is_typeof(right)
        || left.kind() == "null"
        || right.kind() == "null"
        || (is_literal(left) && left.kind() == right.kind())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(code: &str) -> Parser {
        Parser::new(code.to_string()).expect("parse")
    }

    #[test]
    fn eqeqeq_smart_allows_null_and_typeof() {
        let parser = parse(
            "if (a == null) {}\nif (typeof a == 'string') {}\nif ('x' == 'y') {}\nif (a == b) {}\n",
        );
        let smart = eqeqeq(&parser, &RuleOptions::Eqeqeq(EqeqeqMode::Smart));
        let always = eqeqeq(&parser, &RuleOptions::Eqeqeq(EqeqeqMode::Always));

        assert_eq!(smart.len(), 1);
        assert_eq!(smart[0].line, 4);
        assert_eq!(always.len(), 4);
    }

    #[test]
    fn eqeqeq_reports_the_operator() {
        let parser = parse("let same = a != b;\n");
        let findings = eqeqeq(&parser, &RuleOptions::Eqeqeq(EqeqeqMode::Always));

        assert_eq!(findings, vec![Finding::new(
            1,
            14,
            "Expected '!==' and instead saw '!='."
        )]);
    }

    #[test]
    fn no_console_respects_allow_list() {
        let parser = parse("console.log('a');\nconsole.error('b');\n");
        let options = no_console_options(&[json!({ "allow": ["error"] })]).expect("options");
        let findings = no_console(&parser, &options).expect("run");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn no_console_rejects_malformed_allow() {
        assert!(no_console_options(&[json!({ "allow": "log" })]).is_err());
        assert!(no_console_options(&[json!("log")]).is_err());
    }

    #[test]
    fn self_assignment_is_reported_on_the_value() {
        let parser = parse("let a = 1;\na = a;\nthis.x = this.x;\na = b;\n");
        let findings = no_self_assign(&parser).expect("run");

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].message, "'a' is assigned to itself.");
        assert_eq!((findings[0].line, findings[0].column), (2, 5));
        assert_eq!(findings[1].message, "'this.x' is assigned to itself.");
    }

    #[test]
    fn debugger_and_var_are_located() {
        let parser = parse("var a = 1;\nfunction f() {\n  debugger;\n}\n");

        let debuggers = no_debugger(&parser).expect("run");
        let vars = no_var(&parser).expect("run");

        assert_eq!(debuggers, vec![Finding::new(3, 3, "Unexpected 'debugger' statement.")]);
        assert_eq!(vars, vec![Finding::new(
            1,
            1,
            "Unexpected var, use let or const instead."
        )]);
    }
}
