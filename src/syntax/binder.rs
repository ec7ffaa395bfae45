//! Binding resolution: mapping an identifier occurrence to the declaration it
//! denotes, per lexical scoping rules.
//!
//! The capability is a trait so the reference matcher can be exercised with a
//! fake resolver; `ScopeBinder` is the real implementation. It walks enclosing
//! scopes outward and, at module root, follows the file's relative imports
//! into other workspace files. Property positions of member accesses are never
//! bound, since deciding what `obj.method` denotes would need type inference.

use crate::analysis::imports::{import_specifier, resolve_relative};
use crate::analysis::SymbolKind;
use crate::syntax::common::node_text;
use crate::workspace::{ParsedFile, Workspace};
use std::path::PathBuf;
use tree_sitter::Node;

/// The declaration an occurrence resolves to, identified by its name node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclTarget {
    pub file: PathBuf,
    pub byte: usize,
    pub kind: SymbolKind,
}

/// Binding-resolution capability consumed by the reference matcher
pub trait Resolver {
    fn resolve(&self, workspace: &Workspace, file: &ParsedFile, ident: Node) -> Option<DeclTarget>;
}

/// Lexical scope walker over the tree-sitter AST
#[derive(Debug, Default)]
pub struct ScopeBinder;

impl ScopeBinder {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for ScopeBinder {
    fn resolve(&self, workspace: &Workspace, file: &ParsedFile, ident: Node) -> Option<DeclTarget> {
        let name = node_text(ident, &file.source);

        if is_member_property(ident) {
            return None;
        }

        // Walk enclosing scopes, innermost first
        let mut current = ident.parent();
        while let Some(scope) = current {
            match scope.kind() {
                "statement_block" | "program" => {
                    if let Some(target) = declaration_in_scope(scope, name, file) {
                        return Some(target);
                    }
                }
                "function_declaration"
                | "generator_function_declaration"
                | "function_expression"
                | "arrow_function"
                | "method_definition" => {
                    if let Some(target) = parameter_of(scope, name, file) {
                        return Some(target);
                    }
                }
                "for_statement" | "for_in_statement" => {
                    if let Some(target) = loop_binding(scope, name, file) {
                        return Some(target);
                    }
                }
                _ => {}
            }
            if scope.kind() == "program" {
                break;
            }
            current = scope.parent();
        }

        // Not declared locally: follow the module's imports
        let (exported, specifier) = imported_binding(file, name)?;
        let target_path = resolve_relative(&file.path, &specifier, workspace)?;
        let target_file = workspace.file(&target_path).ok()?;
        if target_file.is_ambient {
            return None;
        }
        top_level_declaration(target_file, &exported)
    }
}

/// Whether the identifier sits in the property slot of a member access
fn is_member_property(ident: Node) -> bool {
    ident
        .parent()
        .map(|p| {
            p.kind() == "member_expression" && p.child_by_field_name("property") == Some(ident)
        })
        .unwrap_or(false)
}

/// Search the direct children of a scope node for a declaration of `name`
fn declaration_in_scope(scope: Node, name: &str, file: &ParsedFile) -> Option<DeclTarget> {
    let mut cursor = scope.walk();
    for child in scope.children(&mut cursor) {
        // export wrappers at module root declare through their inner node
        let decl = if child.kind() == "export_statement" {
            match child.child_by_field_name("declaration") {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            child
        };

        if let Some(target) = named_declaration(decl, name, file) {
            return Some(target);
        }
    }
    None
}

/// Match one declaration node against `name`, descending into declarator lists
fn named_declaration(decl: Node, name: &str, file: &ParsedFile) -> Option<DeclTarget> {
    let kind = match decl.kind() {
        "function_declaration" | "generator_function_declaration" => SymbolKind::Function,
        "class_declaration" | "abstract_class_declaration" => SymbolKind::Class,
        "interface_declaration" => SymbolKind::Interface,
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for declarator in decl.children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name_node) = declarator.child_by_field_name("name") {
                    if node_text(name_node, &file.source) == name {
                        return Some(DeclTarget {
                            file: file.path.clone(),
                            byte: name_node.start_byte(),
                            kind: SymbolKind::Variable,
                        });
                    }
                }
            }
            return None;
        }
        _ => return None,
    };

    let name_node = decl.child_by_field_name("name")?;
    if node_text(name_node, &file.source) != name {
        return None;
    }
    Some(DeclTarget {
        file: file.path.clone(),
        byte: name_node.start_byte(),
        kind,
    })
}

/// Parameters of an enclosing callable bind as variables
fn parameter_of(callable: Node, name: &str, file: &ParsedFile) -> Option<DeclTarget> {
    // single bare-identifier arrow parameter
    if let Some(param) = callable.child_by_field_name("parameter") {
        if param.kind() == "identifier" && node_text(param, &file.source) == name {
            return Some(DeclTarget {
                file: file.path.clone(),
                byte: param.start_byte(),
                kind: SymbolKind::Variable,
            });
        }
    }

    let params = callable.child_by_field_name("parameters")?;
    let mut cursor = params.walk();
    for param in params.children(&mut cursor) {
        if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
            continue;
        }
        let pattern = param.child_by_field_name("pattern")?;
        if pattern.kind() == "identifier" && node_text(pattern, &file.source) == name {
            return Some(DeclTarget {
                file: file.path.clone(),
                byte: pattern.start_byte(),
                kind: SymbolKind::Variable,
            });
        }
    }
    None
}

/// Bindings introduced by a for/for-in header
fn loop_binding(loop_node: Node, name: &str, file: &ParsedFile) -> Option<DeclTarget> {
    for field in ["initializer", "left"] {
        if let Some(header) = loop_node.child_by_field_name(field) {
            if let Some(target) = named_declaration(header, name, file) {
                return Some(target);
            }
        }
    }
    None
}

/// What local `name` is bound to by this file's import statements, if
/// anything: the exported name plus the module specifier. Default and
/// namespace imports bind names we cannot chase without export analysis, so
/// only named imports (with optional alias) participate.
fn imported_binding(file: &ParsedFile, name: &str) -> Option<(String, String)> {
    let root = file.root();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() != "import_statement" {
            continue;
        }
        let Some(specifier) = import_specifier(child, &file.source) else {
            continue;
        };

        let mut stmt_cursor = child.walk();
        for clause in child.children(&mut stmt_cursor) {
            if clause.kind() != "import_clause" {
                continue;
            }
            let mut clause_cursor = clause.walk();
            for group in clause.children(&mut clause_cursor) {
                if group.kind() != "named_imports" {
                    continue;
                }
                let mut group_cursor = group.walk();
                for spec in group.children(&mut group_cursor) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(exported) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let local = spec.child_by_field_name("alias").unwrap_or(exported);
                    if node_text(local, &file.source) == name {
                        return Some((
                            node_text(exported, &file.source).to_string(),
                            specifier.to_string(),
                        ));
                    }
                }
            }
        }
    }
    None
}

/// First top-level declaration of `name` in a file, export wrappers included
pub fn top_level_declaration(file: &ParsedFile, name: &str) -> Option<DeclTarget> {
    declaration_in_scope(file.root(), name, file)
}
