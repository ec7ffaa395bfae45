use crate::analysis::{analyze_symbol, DeadSymbol, SymbolKind};
use crate::error::{Result, SymrefError};
use crate::syntax::node_text;
use crate::workspace::{ParsedFile, Workspace};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use tree_sitter::Node;

/// Enumerates a file's declarations and reports the ones nothing outside the
/// file refers to.
///
/// Each distinct name runs the full locate-and-match pipeline once with
/// default options (same-file references excluded). The kind comes from the
/// structural enumeration here, which knows whether a name was seen as a
/// class member or a top-level declaration.
pub struct DeadSymbolScanner<'ws> {
    workspace: &'ws Workspace,
}

impl<'ws> DeadSymbolScanner<'ws> {
    pub fn new(workspace: &'ws Workspace) -> Self {
        Self { workspace }
    }

    /// Scan one file; fails with `FileNotInWorkspace` for paths outside the
    /// analyzed set
    pub fn scan(&self, path: &Path) -> Result<Vec<DeadSymbol>> {
        let file = self.workspace.file(path)?;

        let mut seen = HashSet::new();
        let mut dead = Vec::new();

        for candidate in enumerate_declarations(file) {
            // each distinct name is analyzed once; first occurrence wins
            if !seen.insert(candidate.name.clone()) {
                continue;
            }

            match analyze_symbol(self.workspace, &candidate.name, false) {
                Ok(analysis) if !analysis.has_references => {
                    debug!("No references to {} '{}'", candidate.kind.display_name(), candidate.name);
                    dead.push(DeadSymbol {
                        kind: candidate.kind,
                        name: candidate.name,
                        context: candidate.context,
                    });
                }
                Ok(_) => {}
                // a name the locator cannot place is not evidence of deadness
                Err(SymrefError::SymbolNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(dead)
    }
}

struct DeclaredName {
    name: String,
    kind: SymbolKind,
    context: String,
}

/// Top-level functions, classes, interfaces and variables first, then the
/// methods and properties of each class, each group in document order
fn enumerate_declarations(file: &ParsedFile) -> Vec<DeclaredName> {
    let mut out = Vec::new();
    let mut classes = Vec::new();
    let root = file.root();
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        let decl = if child.kind() == "export_statement" {
            match child.child_by_field_name("declaration") {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            child
        };

        match decl.kind() {
            "function_declaration" | "generator_function_declaration" => {
                push_named(&mut out, decl, file, SymbolKind::Function, "global scope");
            }
            "class_declaration" | "abstract_class_declaration" => {
                push_named(&mut out, decl, file, SymbolKind::Class, "global scope");
                classes.push(decl);
            }
            "interface_declaration" => {
                push_named(&mut out, decl, file, SymbolKind::Interface, "global scope");
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut decl_cursor = decl.walk();
                for declarator in decl.children(&mut decl_cursor) {
                    if declarator.kind() == "variable_declarator" {
                        push_named(
                            &mut out,
                            declarator,
                            file,
                            SymbolKind::Variable,
                            "global scope",
                        );
                    }
                }
            }
            _ => {}
        }
    }

    for class_decl in classes {
        if let Some(name_node) = class_decl.child_by_field_name("name") {
            let class_name = node_text(name_node, &file.source);
            class_members(&mut out, class_decl, class_name, file);
        }
    }

    out
}

fn class_members(out: &mut Vec<DeclaredName>, class_decl: Node, class_name: &str, file: &ParsedFile) {
    let Some(body) = class_decl.child_by_field_name("body") else {
        return;
    };
    let context = format!("class {class_name}");

    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        match member.kind() {
            "method_definition" => {
                // constructors are invoked through the class name, never as
                // a named method
                if member
                    .child_by_field_name("name")
                    .map(|n| node_text(n, &file.source) == "constructor")
                    .unwrap_or(false)
                {
                    continue;
                }
                push_named(out, member, file, SymbolKind::Method, &context);
            }
            "public_field_definition" => {
                push_named(out, member, file, SymbolKind::Property, &context);
            }
            _ => {}
        }
    }
}

fn push_named(
    out: &mut Vec<DeclaredName>,
    decl: Node,
    file: &ParsedFile,
    kind: SymbolKind,
    context: &str,
) {
    if let Some(name_node) = decl.child_by_field_name("name") {
        out.push(DeclaredName {
            name: node_text(name_node, &file.source).to_string(),
            kind,
            context: context.to_string(),
        });
    }
}
