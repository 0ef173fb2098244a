#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Tree-sitter parser wrapper for JavaScript (and JSX) source code.

use std::{collections::BTreeMap, fmt::Formatter};

use anyhow::{Context, Result, anyhow};
use tree_sitter::{Language, Node, Query, QueryCursor, StreamingIterator, Tree};

use crate::Dict;

/// A single capture produced by a query, with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Name of the capture in the query (without the leading `@`).
    pub name:   String,
    /// Source text covered by the captured node.
    pub text:   String,
    /// 1-based line of the node's first character.
    pub line:   u32,
    /// 1-based column of the node's first character.
    pub column: u32,
}

/// A struct that wraps a tree-sitter parse tree and the source it came from.
#[derive(Clone)]
pub struct Parser {
    /// The source code being parsed.
    code: String,
    /// The parse tree.
    tree: Tree,
    /// The tree-sitter JavaScript grammar language.
    lang: Language,
}

/// Returns the compiled tree-sitter JavaScript language.
fn javascript_language() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("lines", &self.line_count())
            .field("has_error", &self.root_node().has_error())
            .finish()
    }
}

impl Parser {
    /// Parses `source_code` and returns a new parser object.
    ///
    /// Tree-sitter always produces a tree; syntax problems show up as `ERROR`
    /// or missing nodes rather than as a failure here.
    pub fn new(source_code: String) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        let language = javascript_language();

        parser
            .set_language(&language)
            .with_context(|| "Failed to load JavaScript grammar")?;
        let tree = parser
            .parse(source_code.as_str(), None)
            .ok_or_else(|| anyhow!("Error parsing JavaScript code"))?;

        Ok(Self {
            code: source_code,
            tree,
            lang: language,
        })
    }

    /// Returns the parse tree's root node.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the tree-sitter language (useful for custom queries).
    pub fn language(&self) -> &Language {
        &self.lang
    }

    /// Returns the source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.code.as_bytes()).unwrap_or_default()
    }

    /// Returns every node of the tree in pre-order, which is also source
    /// order.
    pub fn descendants(&self) -> Vec<Node<'_>> {
        let mut nodes = Vec::new();
        let mut cursor = self.tree.walk();

        loop {
            nodes.push(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return nodes;
                }
            }
        }
    }

    /// Applies a tree sitter query and returns the result as a collection of
    /// HashMaps.
    ///
    /// * `q`: the tree-sitter query to be applied
    pub fn query(&self, q: &str) -> Result<Vec<Dict>> {
        let mut results = vec![];
        let query = Query::new(&self.lang, q)
            .with_context(|| format!("Failed to compile tree-sitter query: {q}"))?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), self.code.as_bytes());
        let capture_names = query.capture_names();

        while let Some(m) = matches.next() {
            let mut result = Dict::new();

            for capture in m.captures {
                let name = capture_names
                    .get(capture.index as usize)
                    .ok_or_else(|| anyhow!("Capture index {} has no name.", capture.index))?;
                let value = capture
                    .node
                    .utf8_text(self.code.as_bytes())
                    .with_context(|| {
                        format!(
                            "Cannot match query result indices with source code for capture name: \
                             {name}."
                        )
                    })?;

                result.insert(name.to_string(), value.to_string());
            }
            results.push(result);
        }

        Ok(results)
    }

    /// Returns every occurrence of `capture_name` in the query's matches, with
    /// 1-based positions, in source order.
    pub fn query_captures(&self, q: &str, capture_name: &str) -> Result<Vec<Capture>> {
        let query = Query::new(&self.lang, q)
            .with_context(|| format!("Failed to compile tree-sitter query: {q}"))?;
        let capture_index = query
            .capture_index_for_name(capture_name)
            .ok_or_else(|| anyhow!("Capture name {capture_name} not present in query"))?;

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), self.code.as_bytes());
        let mut results = Vec::new();

        while let Some(m) = matches.next() {
            for capture in m.captures.iter().filter(|c| c.index == capture_index) {
                let text = capture
                    .node
                    .utf8_text(self.code.as_bytes())
                    .context("Cannot map capture to source text")?;
                let (line, column) = self.position(capture.node);
                results.push(Capture {
                    name: capture_name.to_string(),
                    text: text.to_string(),
                    line,
                    column,
                });
            }
        }

        results.sort_by_key(|c| (c.line, c.column));
        results.dedup();
        Ok(results)
    }

    /// Applies a tree sitter query and returns, per match, every capture keyed
    /// by its name.
    pub fn query_matches(&self, q: &str) -> Result<Vec<BTreeMap<String, Capture>>> {
        let query = Query::new(&self.lang, q)
            .with_context(|| format!("Failed to compile tree-sitter query: {q}"))?;
        let capture_names = query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), self.code.as_bytes());
        let mut results = Vec::new();

        while let Some(m) = matches.next() {
            let mut captures = BTreeMap::new();
            for capture in m.captures {
                let name = capture_names
                    .get(capture.index as usize)
                    .ok_or_else(|| anyhow!("Capture index {} has no name.", capture.index))?;
                let text = capture
                    .node
                    .utf8_text(self.code.as_bytes())
                    .context("Cannot map capture to source text")?;
                let (line, column) = self.position(capture.node);
                captures.insert(name.to_string(), Capture {
                    name: name.to_string(),
                    text: text.to_string(),
                    line,
                    column,
                });
            }
            results.push(captures);
        }

        Ok(results)
    }

    /// Returns the 1-based (line, column) where `node` starts. Columns count
    /// characters, not bytes.
    pub fn position(&self, node: Node<'_>) -> (u32, u32) {
        let start = node.start_position();
        let line_start = node.start_byte().saturating_sub(start.column);
        let column = self
            .code
            .get(line_start..node.start_byte())
            .map_or(start.column, |prefix| prefix.chars().count());
        (
            u32::try_from(start.row + 1).unwrap_or(u32::MAX),
            u32::try_from(column + 1).unwrap_or(u32::MAX),
        )
    }

    /// Returns the total number of lines in the source code.
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}
