//! Human-readable enclosing-scope labels.

use crate::syntax::node_text;
use tree_sitter::Node;

/// Derives the enclosing-context label for any AST position: "global scope",
/// "function {name}", "class {name}", "class {name}.{method}",
/// "interface {name}", or "method {name}" for a method with no enclosing
/// class.
pub struct ContextDescriber;

impl ContextDescriber {
    pub fn describe(node: Node, source: &str) -> String {
        let mut method = None;
        let mut class = None;
        let mut interface = None;
        let mut function = None;

        let mut current = Some(node);
        while let Some(n) = current {
            match n.kind() {
                "method_definition" if method.is_none() => {
                    method = declaration_name(n, source);
                }
                "class_declaration" | "abstract_class_declaration" if class.is_none() => {
                    class = declaration_name(n, source);
                }
                "interface_declaration" if interface.is_none() => {
                    interface = declaration_name(n, source);
                }
                "function_declaration" if function.is_none() => {
                    function = declaration_name(n, source);
                }
                _ => {}
            }
            current = n.parent();
        }

        // Class plus method wins over either alone
        match (class, method) {
            (Some(c), Some(m)) => format!("class {c}.{m}"),
            (Some(c), None) => format!("class {c}"),
            (None, method) => {
                if let Some(i) = interface {
                    format!("interface {i}")
                } else if let Some(f) = function {
                    format!("function {f}")
                } else if let Some(m) = method {
                    // method outside any class (object literal member)
                    format!("method {m}")
                } else {
                    "global scope".to_string()
                }
            }
        }
    }
}

fn declaration_name(node: Node, source: &str) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
}
