//! Tree-sitter node helpers shared by the locator, matcher and binder.

use crate::analysis::{SourcePosition, SymbolKind};
use std::path::Path;
use tree_sitter::Node;

/// Extract text from a node
pub fn node_text<'a>(node: Node<'a>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Convert a tree-sitter point to a 1-based source position
pub fn point_to_position(file: &Path, point: tree_sitter::Point) -> SourcePosition {
    SourcePosition {
        file: file.to_path_buf(),
        line: point.row + 1,      // tree-sitter uses 0-indexed lines
        column: point.column + 1, // tree-sitter uses 0-indexed columns
    }
}

/// Node kinds that count as identifier occurrences
pub fn is_identifier(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "type_identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
    )
}

/// Iterator over identifier occurrences under a node, in document order
pub fn identifiers(node: Node) -> impl Iterator<Item = Node> {
    descendants(node).filter(|n| is_identifier(n.kind()))
}

/// If `ident` stands in the name position of a declaration header, return the
/// declared kind and the declaration node. Used both to accept definition
/// sites and to reject re-declarations when matching references.
pub fn declared_as<'a>(ident: Node<'a>) -> Option<(SymbolKind, Node<'a>)> {
    let parent = ident.parent()?;

    let kind = match parent.kind() {
        "class_declaration" | "abstract_class_declaration" => SymbolKind::Class,
        "interface_declaration" => SymbolKind::Interface,
        "function_declaration" | "generator_function_declaration" => SymbolKind::Function,
        "method_definition" | "method_signature" | "abstract_method_signature" => {
            SymbolKind::Method
        }
        "public_field_definition" | "property_signature" => SymbolKind::Property,
        "variable_declarator" => SymbolKind::Variable,
        _ => return None,
    };

    // Only the name slot declares; the same parent kinds carry other
    // identifiers (initializers, type annotations) that are uses.
    if parent.child_by_field_name("name") == Some(ident) {
        Some((kind, parent))
    } else {
        None
    }
}

/// Iterator over all descendant nodes, root first
pub fn descendants(node: Node) -> impl Iterator<Item = Node> {
    DescendantIterator::new(node)
}

struct DescendantIterator<'a> {
    cursor: tree_sitter::TreeCursor<'a>,
    done: bool,
}

impl<'a> DescendantIterator<'a> {
    fn new(node: Node<'a>) -> Self {
        Self {
            cursor: node.walk(),
            done: false,
        }
    }
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        // Try to go to first child
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        // Try to go to next sibling
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }

            // Go up to parent
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}
