use crate::analysis::context::ContextDescriber;
use crate::analysis::Definition;
use crate::error::{Result, SymrefError};
use crate::syntax::{declared_as, identifiers, node_text};
use crate::workspace::Workspace;
use tracing::debug;

/// Finds the definitive binding site of a symbol name.
///
/// Files are scanned in workspace enumeration order and the first identifier
/// occurrence standing in the name position of a declaration header wins.
/// When several files declare the same name, the one in the alphabetically
/// first file is picked; that tie-break is deterministic but carries no
/// semantic preference.
pub struct DefinitionLocator<'ws> {
    workspace: &'ws Workspace,
}

impl<'ws> DefinitionLocator<'ws> {
    pub fn new(workspace: &'ws Workspace) -> Self {
        Self { workspace }
    }

    /// Locate the definition of `name` (exact, case-sensitive), or fail with
    /// `SymbolNotFound`
    pub fn locate(&self, name: &str) -> Result<Definition> {
        for file in self.workspace.files() {
            if file.is_ambient {
                continue;
            }

            for ident in identifiers(file.root()) {
                if node_text(ident, &file.source) != name {
                    continue;
                }
                let Some((kind, decl)) = declared_as(ident) else {
                    continue;
                };

                // The context is the scope the declaration sits in, not the
                // declaration itself
                let context = match decl.parent() {
                    Some(parent) => ContextDescriber::describe(parent, &file.source),
                    None => "global scope".to_string(),
                };

                let position = file.position_of(ident);
                debug!(
                    "Located {} '{}' at {} ({})",
                    kind.display_name(),
                    name,
                    position,
                    context
                );

                return Ok(Definition {
                    name: name.to_string(),
                    kind,
                    position,
                    context,
                    file: file.path.clone(),
                    name_byte: ident.start_byte(),
                });
            }
        }

        Err(SymrefError::SymbolNotFound {
            name: name.to_string(),
        })
    }
}
