use serde::Serialize;
use std::path::PathBuf;

/// Kind of a located declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    Method,
    Property,
    Variable,
}

impl SymbolKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Variable => "variable",
        }
    }
}

/// Location in source code, 1-based, with the workspace-relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// The definitive binding site of a symbol name.
///
/// `file` and `name_byte` identify the declaration's name node; the matcher
/// uses them to decide whether a resolved occurrence denotes this definition.
#[derive(Debug, Clone, Serialize)]
pub struct Definition {
    pub name: String,
    pub kind: SymbolKind,
    pub position: SourcePosition,
    pub context: String,

    #[serde(skip)]
    pub(crate) file: PathBuf,
    #[serde(skip)]
    pub(crate) name_byte: usize,
}

/// A location that genuinely refers to the analyzed definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSite {
    pub position: SourcePosition,
    pub context: String,
}

/// Result of one symbol query. Rebuilt fresh on every call; nothing is cached
/// across queries.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolAnalysis {
    pub name: String,
    pub kind: SymbolKind,
    pub definition: Definition,
    pub references: Vec<ReferenceSite>,
    pub has_references: bool,
}

/// A declaration with zero external references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadSymbol {
    pub kind: SymbolKind,
    pub name: String,
    pub context: String,
}

impl std::fmt::Display for DeadSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.kind.display_name(),
            self.name,
            self.context
        )
    }
}
