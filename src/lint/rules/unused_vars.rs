//! `no-unused-vars`.
//!
//! Bindings and references are matched by name across the whole file, so a
//! name shadowed in an inner scope counts as used if either binding is read.
//! Function parameters and catch parameters are not checked. Writes whose
//! value is discarded (`count = 5;`, `count++;`) are not reads, and neither
//! are references from inside a function or class to its own name.

use std::collections::HashSet;

use anyhow::Result;
use tree_sitter::Node;

use super::Finding;
use crate::javascript::{Parser, queries::JSX_QUERY};

/// Node kinds that read a binding by name.
const REFERENCE_KINDS: [&str; 2] = ["identifier", "shorthand_property_identifier"];

/// Initializers whose own body may mention the name they are bound to.
const SELF_REFERENCING_KINDS: [&str; 4] =
    ["function_expression", "arrow_function", "generator_function", "class"];

/// A name introduced by a declaration.
struct Binding<'tree> {
    /// The identifier node that introduces the name.
    node:     Node<'tree>,
    /// Whether the declaration also assigns a value.
    assigned: bool,
    /// Whether the declaration is exported.
    exported: bool,
    /// The function or class the name is bound to; references inside it do
    /// not count as use.
    own:      Option<Node<'tree>>,
}

/// Declared names that are never referenced.
pub(super) fn no_unused_vars(parser: &Parser) -> Result<Vec<Finding>> {
    let mut bindings = Vec::new();
    let mut not_references = HashSet::new();

    for node in parser.descendants() {
        match node.kind() {
            "variable_declarator" => {
                let Some(name) = node.child_by_field_name("name") else {
                    continue;
                };
                let value = node.child_by_field_name("value");
                let exported = node
                    .parent()
                    .and_then(|declaration| declaration.parent())
                    .is_some_and(|parent| parent.kind() == "export_statement");
                let own = value.filter(|value| SELF_REFERENCING_KINDS.contains(&value.kind()));
                for identifier in pattern_identifiers(name) {
                    bindings.push(Binding {
                        node: identifier,
                        assigned: value.is_some(),
                        exported,
                        own,
                    });
                }
            }
            "for_in_statement" if node.child_by_field_name("kind").is_some() => {
                let Some(left) = node.child_by_field_name("left") else {
                    continue;
                };
                for identifier in pattern_identifiers(left) {
                    bindings.push(Binding {
                        node:     identifier,
                        assigned: true,
                        exported: false,
                        own:      None,
                    });
                }
            }
            "function_declaration" | "generator_function_declaration" | "class_declaration" => {
                let Some(name) = node.child_by_field_name("name") else {
                    continue;
                };
                let exported = node
                    .parent()
                    .is_some_and(|parent| parent.kind() == "export_statement");
                bindings.push(Binding {
                    node: name,
                    assigned: false,
                    exported,
                    own: Some(node),
                });
            }
            "import_clause" => import_bindings(node, &mut bindings, &mut not_references),
            _ => {}
        }
    }

    let declared: HashSet<usize> = bindings.iter().map(|b| b.node.id()).collect();
    let mut references = Vec::new();
    let mut written = HashSet::new();
    for node in parser.descendants() {
        if !REFERENCE_KINDS.contains(&node.kind())
            || declared.contains(&node.id())
            || not_references.contains(&node.id())
        {
            continue;
        }
        if is_discarded_write(node) {
            written.insert(parser.text(node));
        } else {
            references.push(node);
        }
    }

    // JSX compiles to `React.createElement`, so any JSX reads `React`.
    let reads_react = !parser.query(JSX_QUERY)?.is_empty();

    Ok(bindings
        .into_iter()
        .filter(|binding| !binding.exported)
        .filter_map(|binding| {
            let name = parser.text(binding.node);
            let used = (reads_react && name == "React")
                || references.iter().any(|reference| {
                    parser.text(*reference) == name
                        && !binding.own.is_some_and(|own| encloses(own, *reference))
                });
            if used {
                return None;
            }
            let message = if binding.assigned || written.contains(name) {
                format!("'{name}' is assigned a value but never used.")
            } else {
                format!("'{name}' is defined but never used.")
            };
            Some(Finding::at(parser, binding.node, message))
        })
        .collect())
}

/// Whether `identifier` is only written to: the target of an assignment or
/// update whose value is thrown away, or the target of a `for ... in/of`
/// loop without a declaration.
fn is_discarded_write(identifier: Node<'_>) -> bool {
    let Some(parent) = identifier.parent() else {
        return false;
    };
    let target = match parent.kind() {
        "assignment_expression" | "augmented_assignment_expression" => {
            parent.child_by_field_name("left")
        }
        "update_expression" => parent.child_by_field_name("argument"),
        "for_in_statement" => return parent.child_by_field_name("left") == Some(identifier),
        _ => None,
    };
    target == Some(identifier) && value_discarded(parent)
}

/// Whether the value of `expression` is never used.
fn value_discarded(expression: Node<'_>) -> bool {
    let Some(parent) = expression.parent() else {
        return false;
    };
    match parent.kind() {
        "expression_statement" => true,
        "for_statement" => parent.child_by_field_name("increment") == Some(expression),
        "sequence_expression" => {
            parent.named_child(parent.named_child_count().saturating_sub(1)) != Some(expression)
                || value_discarded(parent)
        }
        _ => false,
    }
}

/// Whether `inner` lies within `outer`.
fn encloses(outer: Node<'_>, inner: Node<'_>) -> bool {
    outer.start_byte() <= inner.start_byte() && inner.end_byte() <= outer.end_byte()
}

/// Records the local names an `import` clause introduces. Imported names
/// that are renamed (`a` in `a as b`) are neither bindings nor references.
fn import_bindings<'tree>(
    clause: Node<'tree>,
    bindings: &mut Vec<Binding<'tree>>,
    not_references: &mut HashSet<usize>,
) {
    let mut push = |node: Node<'tree>| {
        bindings.push(Binding {
            node,
            assigned: false,
            exported: false,
            own: None,
        })
    };

    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => push(child),
            "namespace_import" => {
                let mut inner = child.walk();
                for name in child.named_children(&mut inner) {
                    if name.kind() == "identifier" {
                        push(name);
                    }
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for specifier in child
                    .named_children(&mut inner)
                    .filter(|n| n.kind() == "import_specifier")
                {
                    let name = specifier.child_by_field_name("name");
                    match specifier.child_by_field_name("alias") {
                        Some(alias) => {
                            if let Some(name) = name {
                                not_references.insert(name.id());
                            }
                            push(alias);
                        }
                        None => {
                            if let Some(name) = name {
                                push(name);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Identifiers bound by a declarator's name, which may be a destructuring
/// pattern.
fn pattern_identifiers(pattern: Node<'_>) -> Vec<Node<'_>> {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => vec![pattern],
        "pair_pattern" => pattern
            .child_by_field_name("value")
            .map(pattern_identifiers)
            .unwrap_or_default(),
        "assignment_pattern" | "object_assignment_pattern" => pattern
            .child_by_field_name("left")
            .map(pattern_identifiers)
            .unwrap_or_default(),
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = pattern.walk();
            pattern
                .named_children(&mut cursor)
                .flat_map(pattern_identifiers)
                .collect()
        }
        _ => Vec::new(),
    }
}
