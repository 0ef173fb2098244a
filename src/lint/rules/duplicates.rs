//! Rules about repeated entries: `no-dupe-keys` and `no-duplicate-case`.

use std::collections::HashSet;

use tree_sitter::Node;

use super::{Finding, code_children};
use crate::javascript::Parser;

/// Duplicate property names inside one object literal. Computed keys and
/// getter/setter pairs are not compared.
pub(super) fn no_dupe_keys(parser: &Parser) -> Vec<Finding> {
    let mut findings = Vec::new();

    for object in parser
        .descendants()
        .into_iter()
        .filter(|node| node.kind() == "object")
    {
        let mut seen = HashSet::new();
        for property in code_children(object) {
            let Some((key_node, key)) = property_key(parser, property) else {
                continue;
            };
            if !seen.insert(key.clone()) {
                findings.push(Finding::at(
                    parser,
                    key_node,
                    format!("Duplicate key '{key}'."),
                ));
            }
        }
    }

    findings
}

/// The key node and normalised key name of an object member, if it has a
/// static one.
fn property_key<'tree>(parser: &Parser, property: Node<'tree>) -> Option<(Node<'tree>, String)> {
    let key_node = match property.kind() {
        "pair" => property.child_by_field_name("key")?,
        "shorthand_property_identifier" => property,
        "method_definition" if !is_accessor(property) => property.child_by_field_name("name")?,
        _ => return None,
    };

    let text = parser.text(key_node);
    let key = match key_node.kind() {
        "property_identifier" | "shorthand_property_identifier" => text.to_string(),
        "string" => text
            .get(1..text.len().saturating_sub(1))
            .unwrap_or_default()
            .to_string(),
        "number" => normalise_number(text),
        _ => return None,
    };
    Some((key_node, key))
}

/// Whether a method definition is a `get` or `set` accessor.
fn is_accessor(method: Node<'_>) -> bool {
    let mut cursor = method.walk();
    method
        .children(&mut cursor)
        .any(|child| matches!(child.kind(), "get" | "set"))
}

/// `1`, `1.0` and `0x1` name the same property.
fn normalise_number(text: &str) -> String {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok().map(|n| n as f64)
    } else {
        text.parse::<f64>().ok()
    };
    parsed.map_or_else(|| text.to_string(), |n| n.to_string())
}

/// Identical `case` labels within one `switch`, compared ignoring whitespace.
pub(super) fn no_duplicate_case(parser: &Parser) -> Vec<Finding> {
    let mut findings = Vec::new();

    for body in parser
        .descendants()
        .into_iter()
        .filter(|node| node.kind() == "switch_body")
    {
        let mut seen = HashSet::new();
        for case in code_children(body)
            .into_iter()
            .filter(|node| node.kind() == "switch_case")
        {
            let Some(value) = case.child_by_field_name("value") else {
                continue;
            };
            let label: String = parser.text(value).split_whitespace().collect();
            if !seen.insert(label) {
                findings.push(Finding::at(parser, case, "Duplicate case label."));
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Parser {
        Parser::new(code.to_string()).expect("parse")
    }

    #[test]
    fn dupe_keys_across_key_styles() {
        let parser = parse(
            "const pet = {\n  name: 'A',\n  'name': 'B',\n  1: 'x',\n  1.0: 'y',\n  sex,\n  sex: \
             'M',\n};\n",
        );
        let findings = no_dupe_keys(&parser);
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();

        assert_eq!(messages, vec![
            "Duplicate key 'name'.",
            "Duplicate key '1'.",
            "Duplicate key 'sex'."
        ]);
        assert_eq!(findings[0].line, 3);
    }

    #[test]
    fn accessor_pairs_are_not_duplicates() {
        let parser = parse("const o = {\n  get x() { return 1; },\n  set x(v) {},\n};\n");
        assert!(no_dupe_keys(&parser).is_empty());
    }

    #[test]
    fn nested_objects_are_checked_separately() {
        let parser = parse("const o = { a: 1, b: { a: 2 } };\n");
        assert!(no_dupe_keys(&parser).is_empty());
    }

    #[test]
    fn duplicate_case_labels() {
        let parser = parse(
            "switch (party) {\n  case 'Dem':\n    break;\n  case 'Rep':\n    break;\n  case \
             'Dem':\n    break;\n}\n",
        );
        let findings = no_duplicate_case(&parser);

        assert_eq!(findings, vec![Finding::new(6, 3, "Duplicate case label.")]);
    }
}
