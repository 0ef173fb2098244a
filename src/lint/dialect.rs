#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Fatal parsing problems: syntax errors, and syntax the configured dialect
//! does not allow. A file with a fatal problem gets exactly one finding and no
//! rule runs on it.

use anyhow::Result;
use tree_sitter::Node;

use super::{
    options::{Dialect, SourceType},
    rules::Finding,
};
use crate::javascript::{
    Parser,
    queries::{JSX_QUERY, MODULE_SYNTAX_QUERY},
};

/// Longest token quoted in an "Unexpected token" message.
const MAX_TOKEN_LEN: usize = 24;

/// Returns the first fatal problem in the file, if any.
pub fn fatal_problem(parser: &Parser, dialect: Dialect) -> Result<Option<Finding>> {
    let mut candidates = Vec::new();

    if parser.root_node().has_error() {
        candidates.extend(first_syntax_error(parser));
    }

    if dialect.source_type == SourceType::Script {
        candidates.extend(parser.query_captures(MODULE_SYNTAX_QUERY, "statement")?.first().map(
            |c| {
                Finding::new(
                    c.line,
                    c.column,
                    "Parsing error: 'import' and 'export' may appear only with 'sourceType: \
                     module'",
                )
            },
        ));
    }

    if !dialect.jsx {
        candidates.extend(
            parser
                .query_captures(JSX_QUERY, "jsx")?
                .first()
                .map(|c| Finding::new(c.line, c.column, "Parsing error: Unexpected token <")),
        );
    }

    let version = dialect.ecma_version;
    candidates.extend(parser.descendants().into_iter().find_map(|node| {
        let (year, what) = required_edition(parser, node)?;
        (!version.supports(year)).then(|| {
            Finding::at(
                parser,
                node,
                format!(
                    "Parsing error: {what} require ecmaVersion {year} or later (configured: {})",
                    version.year()
                ),
            )
        })
    }));

    Ok(candidates.into_iter().min_by_key(|f| (f.line, f.column)))
}

/// The edition that introduced the syntax `node` stands for, and how the
/// syntax is named in messages. Only the outermost node of a construct is
/// classified, so its first token carries the position.
fn required_edition(parser: &Parser, node: Node<'_>) -> Option<(u32, &'static str)> {
    let operator = node.child_by_field_name("operator").map(|op| op.kind());
    let parent = node.parent().map(|parent| parent.kind());
    let is_async = has_token(node, "async");

    let syntax = match node.kind() {
        "lexical_declaration" => (2015, "'let' and 'const' declarations"),
        "arrow_function" if is_async => (2017, "async functions"),
        "arrow_function" => (2015, "arrow functions"),
        "class_declaration" | "class" => (2015, "classes"),
        "template_string" => (2015, "template literals"),
        "generator_function_declaration" | "generator_function" if is_async => {
            (2018, "async generators")
        }
        "generator_function_declaration" | "generator_function" => (2015, "generators"),
        "function_declaration" | "function_expression" if is_async => {
            (2017, "async functions")
        }
        "method_definition" if is_async && has_token(node, "*") => (2018, "async generators"),
        "method_definition" if is_async => (2017, "async functions"),
        "method_definition" if parent == Some("object") && !is_accessor(node) => {
            (2015, "shorthand methods")
        }
        "import_statement" | "export_statement" => (2015, "modules"),
        "object_pattern" | "array_pattern" => (2015, "destructuring patterns"),
        "assignment_pattern" => (2015, "default parameters"),
        "rest_pattern" if parent == Some("object_pattern") => (2018, "object rest properties"),
        "rest_pattern" => (2015, "rest parameters"),
        "spread_element" if parent == Some("object") => (2018, "object spread properties"),
        "spread_element" => (2015, "spread elements"),
        "for_in_statement" if has_token(node, "await") => (2018, "'for await' loops"),
        "for_in_statement" if operator == Some("of") => (2015, "'for...of' loops"),
        "shorthand_property_identifier" => (2015, "shorthand properties"),
        "computed_property_name" => (2015, "computed property names"),
        "binary_expression" if operator == Some("**") => (2016, "exponentiation operators"),
        "augmented_assignment_expression" if operator == Some("**=") => {
            (2016, "exponentiation operators")
        }
        "await_expression" => (2017, "'await' expressions"),
        "catch_clause" if node.child_by_field_name("parameter").is_none() => {
            (2019, "optional catch bindings")
        }
        "optional_chain" => (2020, "optional chains"),
        "binary_expression" if operator == Some("??") => (2020, "nullish coalescing operators"),
        "augmented_assignment_expression" if matches!(operator, Some("&&=" | "||=" | "??=")) => {
            (2021, "logical assignment operators")
        }
        "field_definition" => (2022, "class fields"),
        "private_property_identifier" => (2022, "private class members"),
        "class_static_block" => (2022, "class static blocks"),
        "import_attribute" => (2025, "import attributes"),
        "number" => number_edition(parser.text(node))?,
        "regex" => regex_edition(parser.text(node.child_by_field_name("flags")?))?,
        _ => return None,
    };
    Some(syntax)
}

/// Editions of numeric literal forms newer than ES5.
fn number_edition(text: &str) -> Option<(u32, &'static str)> {
    let lower = text.to_ascii_lowercase();
    if lower.contains('_') {
        Some((2021, "numeric separators"))
    } else if lower.ends_with('n') {
        Some((2020, "BigInt literals"))
    } else if lower.starts_with("0b") || lower.starts_with("0o") {
        Some((2015, "binary and octal literals"))
    } else {
        None
    }
}

/// The newest edition among a regular expression's flags.
fn regex_edition(flags: &str) -> Option<(u32, &'static str)> {
    flags
        .chars()
        .filter_map(|flag| match flag {
            'u' | 'y' => Some(2015),
            's' => Some(2018),
            'd' => Some(2022),
            'v' => Some(2024),
            _ => None,
        })
        .max()
        .map(|year| (year, "regular expression flags"))
}

/// Whether `node` has an anonymous child token of the given kind.
fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}

/// Whether a method definition is a `get` or `set` accessor, which ES5
/// already allows in object literals.
fn is_accessor(method: Node<'_>) -> bool {
    has_token(method, "get") || has_token(method, "set")
}

/// The first `ERROR` or missing node, in source order.
fn first_syntax_error(parser: &Parser) -> Option<Finding> {
    let node = parser
        .descendants()
        .into_iter()
        .find(|node| node.is_error() || node.is_missing())?;
    Some(Finding::at(parser, node, syntax_message(parser, node)))
}

/// ESLint-style wording for a syntax error node.
fn syntax_message(parser: &Parser, node: Node<'_>) -> String {
    if node.is_missing() {
        return format!("Parsing error: '{}' expected", node.kind());
    }

    let token: String = parser
        .text(node)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .take(MAX_TOKEN_LEN)
        .collect();
    if token.is_empty() {
        "Parsing error: Unexpected token".to_string()
    } else {
        format!("Parsing error: Unexpected token {token}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::options::EcmaVersion;

    fn problem(code: &str, dialect: Dialect) -> Option<Finding> {
        let parser = Parser::new(code.to_string()).expect("parse");
        fatal_problem(&parser, dialect).expect("dialect check")
    }

    #[test]
    fn clean_module_has_no_problem() {
        let code = "import React from 'react';\nexport const el = <div className=\"x\" />;\n";
        assert_eq!(problem(code, Dialect::default()), None);
    }

    #[test]
    fn syntax_errors_are_fatal() {
        let found = problem("const a = ;\nlet b = 1;\n", Dialect::default()).expect("fatal");
        assert_eq!(found.line, 1);
        assert!(found.message.starts_with("Parsing error"));
    }

    #[test]
    fn scripts_reject_modules() {
        let dialect = Dialect {
            source_type: SourceType::Script,
            ..Dialect::default()
        };
        let found = problem("let a = 1;\nexport default a;\n", dialect).expect("fatal");
        assert_eq!(found.line, 2);
        assert!(found.message.contains("sourceType: module"));
    }

    #[test]
    fn jsx_can_be_disabled() {
        let dialect = Dialect {
            jsx: false,
            ..Dialect::default()
        };
        let found = problem("const el = <App />;\n", dialect).expect("fatal");
        assert_eq!(found.message, "Parsing error: Unexpected token <");
        assert_eq!(found.column, 12);
    }

    #[test]
    fn es5_rejects_es2015_syntax() {
        let dialect = Dialect {
            ecma_version: EcmaVersion::from_number(5).expect("es5"),
            ..Dialect::default()
        };
        let found = problem("var a = 1;\nconst b = () => a;\n", dialect).expect("fatal");
        assert_eq!((found.line, found.column), (2, 1));
        assert!(found.message.contains("'let' and 'const'"));
    }

    fn at_version(version: u64) -> Dialect {
        Dialect {
            ecma_version: EcmaVersion::from_number(version).expect("known edition"),
            ..Dialect::default()
        }
    }

    #[test]
    fn es5_rejects_destructuring_defaults_and_shorthand() {
        let found = problem("var {a} = o;\nfoo(a);\n", at_version(5)).expect("fatal");
        assert_eq!((found.line, found.column), (1, 5));
        assert!(found.message.contains("destructuring patterns require ecmaVersion 2015"));

        let code = "function f(x = 1) {\n  for (var y of [...x]) {}\n}\n";
        let found = problem(code, at_version(5)).expect("fatal");
        assert_eq!((found.line, found.column), (1, 12));
        assert!(found.message.contains("default parameters"));

        let found = problem("var o = { a, [k]: 1 };\n", at_version(5)).expect("fatal");
        assert_eq!((found.line, found.column), (1, 11));
        assert!(found.message.contains("shorthand properties"));
    }

    #[test]
    fn later_editions_are_gated_by_year() {
        let code = "async function f(o) {\n  return o?.a ** 2;\n}\n";

        let found = problem(code, at_version(2015)).expect("fatal");
        assert_eq!((found.line, found.column), (1, 1));
        assert_eq!(
            found.message,
            "Parsing error: async functions require ecmaVersion 2017 or later (configured: 2015)"
        );

        let found = problem(code, at_version(2017)).expect("fatal");
        assert_eq!((found.line, found.column), (2, 11));
        assert!(found.message.contains("optional chains require ecmaVersion 2020"));

        assert_eq!(problem(code, at_version(2020)), None);
    }

    #[test]
    fn class_fields_and_literal_forms_need_their_edition() {
        let found = problem("class A {\n  count = 0;\n}\n", at_version(2021)).expect("fatal");
        assert_eq!((found.line, found.column), (2, 3));
        assert!(found.message.contains("class fields require ecmaVersion 2022"));

        let found = problem("const big = 1_000n;\n", at_version(2020)).expect("fatal");
        assert_eq!(found.column, 13);
        assert!(found.message.contains("numeric separators"));

        let found = problem("const re = /a.b/s;\n", at_version(2017)).expect("fatal");
        assert!(found.message.contains("regular expression flags require ecmaVersion 2018"));

        assert_eq!(problem("var n = 2 ** 3;\n", at_version(2016)), None);
    }
}
