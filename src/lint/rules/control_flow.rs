//! Rules about blocks and control flow: `no-unreachable`, `no-empty` and
//! `no-cond-assign`.

use anyhow::Result;
use tree_sitter::Node;

use super::{Finding, code_children};
use crate::javascript::{Parser, queries::COND_ASSIGN_QUERY};

/// Statements after which the rest of a block never runs.
const TERMINATORS: [&str; 4] = [
    "return_statement",
    "throw_statement",
    "break_statement",
    "continue_statement",
];

/// Parents whose `statement_block` is a function body, which may be empty.
const FUNCTION_KINDS: [&str; 6] = [
    "function_declaration",
    "function_expression",
    "arrow_function",
    "method_definition",
    "generator_function",
    "generator_function_declaration",
];

/// Reports the first unreachable statement of every statement list.
pub(super) fn no_unreachable(parser: &Parser) -> Vec<Finding> {
    let mut findings = Vec::new();

    for node in parser.descendants() {
        let statements = match node.kind() {
            "program" | "statement_block" => code_children(node),
            "switch_case" | "switch_default" => {
                let mut cursor = node.walk();
                node.children_by_field_name("body", &mut cursor)
                    .filter(|child| child.kind() != "comment")
                    .collect()
            }
            _ => continue,
        };

        if let Some(statement) = first_unreachable(&statements) {
            findings.push(Finding::at(parser, statement, "Unreachable code."));
        }
    }

    findings
}

/// The first statement following a terminator, skipping hoisted
/// declarations.
fn first_unreachable<'tree>(statements: &[Node<'tree>]) -> Option<Node<'tree>> {
    let mut terminated = false;
    for statement in statements {
        if terminated && !is_hoisted(*statement) {
            return Some(*statement);
        }
        if TERMINATORS.contains(&statement.kind()) {
            terminated = true;
        }
    }
    None
}

/// Function declarations, and `var` declarations without initializers, take
/// effect before the code around them runs.
fn is_hoisted(statement: Node<'_>) -> bool {
    match statement.kind() {
        "function_declaration" | "empty_statement" => true,
        "variable_declaration" => code_children(statement)
            .iter()
            .all(|declarator| declarator.child_by_field_name("value").is_none()),
        _ => false,
    }
}

/// Empty blocks (not function bodies) and empty `switch` statements. A block
/// holding only a comment is not empty; a `switch` without cases is, comments
/// or not.
pub(super) fn no_empty(parser: &Parser) -> Vec<Finding> {
    parser
        .descendants()
        .into_iter()
        .filter_map(|node| match node.kind() {
            "statement_block" if node.named_child_count() == 0 => {
                let is_function_body = node
                    .parent()
                    .is_some_and(|parent| FUNCTION_KINDS.contains(&parent.kind()));
                (!is_function_body)
                    .then(|| Finding::at(parser, node, "Empty block statement."))
            }
            "switch_statement" => {
                let body = node.child_by_field_name("body")?;
                code_children(body)
                    .is_empty()
                    .then(|| Finding::at(parser, node, "Empty switch statement."))
            }
            _ => None,
        })
        .collect()
}

/// Assignments used as the condition of `if`, `while`, `do ... while`, `for`
/// and `?:`. Wrapping the assignment in a second pair of parentheses (one
/// pair in a `for` header) marks it as intended.
pub(super) fn no_cond_assign(parser: &Parser) -> Result<Vec<Finding>> {
    Ok(parser
        .query_captures(COND_ASSIGN_QUERY, "assignment")?
        .into_iter()
        .map(|c| {
            Finding::new(
                c.line,
                c.column,
                "Expected a conditional expression and instead saw an assignment.",
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Parser {
        Parser::new(code.to_string()).expect("parse")
    }

    #[test]
    fn unreachable_reports_once_per_block() {
        let parser = parse(
            "function f() {\n  return 1;\n  let a = 2;\n  let b = 3;\n}\n\nfunction g() {\n  \
             throw new Error('x');\n  function hoisted() {}\n}\n",
        );
        let findings = no_unreachable(&parser);

        assert_eq!(findings, vec![Finding::new(3, 3, "Unreachable code.")]);
    }

    #[test]
    fn unreachable_inside_switch_case() {
        let parser = parse("switch (x) {\n  case 1:\n    break;\n    f();\n  default:\n    g();\n}\n");
        let findings = no_unreachable(&parser);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 4);
    }

    #[test]
    fn empty_blocks_but_not_function_bodies() {
        let parser = parse(
            "function noop() {}\nconst arrow = () => {};\nif (a) {}\ntry { f(); } catch (e) {}\nif \
             (b) {\n  // intentionally blank\n}\nswitch (c) {}\n",
        );
        let findings = no_empty(&parser);
        let lines: Vec<u32> = findings.iter().map(|f| f.line).collect();

        assert_eq!(lines, vec![3, 4, 8]);
        assert_eq!(findings[2].message, "Empty switch statement.");
    }

    #[test]
    fn cond_assign_allows_extra_parentheses() {
        let parser = parse("if (a = b) {}\nwhile ((line = next())) {}\ndo {} while (c = d);\n");
        let findings = no_cond_assign(&parser).expect("run");
        let lines: Vec<u32> = findings.iter().map(|f| f.line).collect();

        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn uninitialized_vars_after_a_terminator_are_hoisted() {
        let parser = parse(
            "function f() {\n  return x;\n  var x;\n}\n\nfunction g() {\n  return 1;\n  var y \
             = 2;\n}\n",
        );
        let findings = no_unreachable(&parser);

        assert_eq!(findings, vec![Finding::new(8, 3, "Unreachable code.")]);
    }

    #[test]
    fn switch_holding_only_a_comment_is_empty() {
        let parser = parse("switch (a) {\n  // nothing yet\n}\n");
        let findings = no_empty(&parser);

        assert_eq!(findings, vec![Finding::new(1, 1, "Empty switch statement.")]);
    }

    #[test]
    fn cond_assign_covers_for_headers_and_ternaries() {
        let parser = parse(
            "for (; x = next(); ) {}\nfor (; (y = next()); ) {}\nconst a = (b = c) ? 1 : \
             2;\nconst d = ((e = f)) ? 1 : 2;\n",
        );
        let findings = no_cond_assign(&parser).expect("run");
        let positions: Vec<(u32, u32)> = findings.iter().map(|f| (f.line, f.column)).collect();

        assert_eq!(positions, vec![(1, 8), (3, 12)]);
    }
}
