//! Relative import-path resolution.
//!
//! Import references are only accepted when the module specifier resolves to
//! the definition's file. Specifiers rarely carry an extension, so resolution
//! tries the candidate suffixes the TypeScript module loader would:
//! `.ts`, `.tsx`, `index.ts` and `index.tsx` under a directory. Resolution is
//! lexical; the workspace itself is the existence oracle, not the filesystem.

use crate::syntax::node_text;
use crate::workspace::{normalize_path, Workspace};
use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Module specifier string of an `import_statement` node
pub fn import_specifier<'a>(import: Node<'a>, source: &'a str) -> Option<&'a str> {
    let source_node = import.child_by_field_name("source")?;
    let mut cursor = source_node.walk();
    let specifier = source_node
        .children(&mut cursor)
        .find(|child| child.kind() == "string_fragment")
        .map(|fragment| node_text(fragment, source));
    specifier
}

/// Nearest enclosing import statement of a node, if any. Re-export
/// statements (`export { X } from './mod'`) carry a module source too and
/// count as import-shaped occurrences.
pub fn enclosing_import(node: Node) -> Option<Node> {
    let mut current = node.parent();
    while let Some(n) = current {
        match n.kind() {
            "import_statement" => return Some(n),
            "export_statement" if n.child_by_field_name("source").is_some() => return Some(n),
            "program" => return None,
            _ => current = n.parent(),
        }
    }
    None
}

/// Whether a module specifier is relative. Non-relative specifiers name
/// external packages and are never resolved.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Resolve a relative specifier against the importing file's directory,
/// returning the workspace file it lands on, if any.
pub fn resolve_relative(
    importing_file: &Path,
    specifier: &str,
    workspace: &Workspace,
) -> Option<PathBuf> {
    if !is_relative_specifier(specifier) {
        return None;
    }

    let dir = importing_file.parent()?;
    let target = dir.join(specifier);

    candidates(&target)
        .into_iter()
        .map(|c| normalize_path(&c))
        .find(|c| workspace.contains(c))
}

fn candidates(target: &Path) -> Vec<PathBuf> {
    // A specifier that already names an extension is taken as-is
    if matches!(
        target.extension().and_then(|e| e.to_str()),
        Some("ts") | Some("tsx")
    ) {
        return vec![target.to_path_buf()];
    }

    vec![
        appended(target, ".ts"),
        appended(target, ".tsx"),
        target.join("index.ts"),
        target.join("index.tsx"),
    ]
}

fn appended(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
