//! Tests for JavaScript parser functionality.

use std::path::PathBuf;

use lintgate::javascript::{
    Parser,
    queries::{CONSOLE_CALL_QUERY, DEBUGGER_QUERY, JSX_QUERY, MODULE_SYNTAX_QUERY},
};

fn parse_fixture(path: &str) -> Parser {
    let full = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("javascript")
        .join(path);
    let code = std::fs::read_to_string(full).expect("read fixture");
    Parser::new(code).expect("parse fixture")
}

#[test]
fn parser_creates_successfully() {
    let code = r#"
const hello = () => console.log("Hello, World!");
hello();
"#;
    let parser = Parser::new(code.to_string()).expect("parse");
    assert!(!parser.root_node().has_error());
    assert_eq!(parser.line_count(), 3);
}

#[test]
fn parser_understands_jsx() {
    let parser = parse_fixture("problem-a/src/App.js");
    assert!(!parser.root_node().has_error());

    let elements = parser.query_captures(JSX_QUERY, "jsx").expect("run query");
    assert_eq!(elements.first().map(|c| (c.line, c.column)), Some((6, 7)));
    assert!(elements.iter().any(|c| c.text.starts_with("<SenatorTable")));
}

#[test]
fn parser_extracts_module_syntax() {
    let parser = parse_fixture("problem-b/src/index.js");
    let statements = parser
        .query_captures(MODULE_SYNTAX_QUERY, "statement")
        .expect("run query");

    let lines: Vec<u32> = statements.iter().map(|c| c.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn query_matches_keep_captures_together() {
    let parser = parse_fixture("warnings.js");
    let matches = parser.query_matches(CONSOLE_CALL_QUERY).expect("run query");

    let methods: Vec<(&str, u32)> = matches
        .iter()
        .map(|m| (m["method"].text.as_str(), m["call"].line))
        .collect();
    assert_eq!(methods, vec![("warn", 3), ("log", 6)]);
}

#[test]
fn query_returns_text_by_capture_name() {
    let parser = parse_fixture("clean.js");
    let results = parser
        .query("(function_declaration name: (identifier) @name)")
        .expect("run query");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].get("name").map(String::as_str), Some("greet"));
}

#[test]
fn invalid_queries_are_errors() {
    let parser = parse_fixture("clean.js");
    assert!(parser.query("(not_a_node) @x").is_err());
    assert!(parser.query_captures(JSX_QUERY, "missing").is_err());
}

#[test]
fn syntax_errors_leave_error_nodes() {
    let parser = parse_fixture("syntax-error.js");
    assert!(parser.root_node().has_error());
    assert!(
        parser
            .descendants()
            .iter()
            .any(|node| node.is_error() || node.is_missing())
    );
    assert_eq!(parser.line_count(), 5);
}

#[test]
fn descendants_are_in_source_order() {
    let parser = Parser::new("let a = 1;\nlet b = a;\n".to_string()).expect("parse");
    let identifiers: Vec<&str> = parser
        .descendants()
        .into_iter()
        .filter(|node| node.kind() == "identifier")
        .map(|node| parser.text(node))
        .collect();

    assert_eq!(identifiers, vec!["a", "b", "a"]);
    assert!(parser.language().node_kind_count() > 0);
}

#[test]
fn columns_count_characters_not_bytes() {
    let parser = Parser::new("const café = 'é'; debugger;\n".to_string()).expect("parse");
    let statements = parser
        .query_captures(DEBUGGER_QUERY, "statement")
        .expect("run query");
    assert_eq!(statements.first().map(|c| (c.line, c.column)), Some((1, 19)));

    let statement = parser
        .descendants()
        .into_iter()
        .find(|node| node.kind() == "debugger_statement")
        .expect("debugger statement");
    assert_eq!(parser.position(statement), (1, 19));
}
