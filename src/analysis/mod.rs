mod context;
mod dead;
pub(crate) mod imports;
mod locator;
mod references;
mod types;

pub use context::ContextDescriber;
pub use dead::DeadSymbolScanner;
pub use locator::DefinitionLocator;
pub use references::ReferenceMatcher;
pub use types::{DeadSymbol, Definition, ReferenceSite, SourcePosition, SymbolAnalysis, SymbolKind};

use crate::error::Result;
use crate::workspace::Workspace;

/// Run the full pipeline for one symbol name: locate the definition, then
/// match references across the workspace.
pub fn analyze_symbol(
    workspace: &Workspace,
    name: &str,
    include_internal: bool,
) -> Result<SymbolAnalysis> {
    let definition = DefinitionLocator::new(workspace).locate(name)?;
    let references = ReferenceMatcher::new(workspace)
        .include_internal(include_internal)
        .find(&definition);

    Ok(SymbolAnalysis {
        name: definition.name.clone(),
        kind: definition.kind,
        has_references: !references.is_empty(),
        definition,
        references,
    })
}
