//! symref - Symbol cross-references and dead symbols for TypeScript projects
//!
//! This library locates the canonical definition of a named symbol across a
//! multi-file TypeScript source tree and enumerates every location that
//! genuinely refers to that definition, not merely a textually identical
//! name. It also derives, per file, the declarations with zero external
//! references.
//!
//! # Architecture
//!
//! A query runs through the following pipeline:
//! 1. **File Discovery** - Find all .ts/.tsx files under include/exclude patterns
//! 2. **Workspace** - Parse every file once with tree-sitter into an immutable snapshot
//! 3. **Definition Location** - First-match scan for the symbol's declaration header
//! 4. **Reference Matching** - Binding resolution plus structural fallbacks per occurrence
//! 5. **Reporting** - Terminal or JSON output
//!
//! The workspace is built once and queried many times; every query is a pure
//! traversal over the snapshot, so concurrent queries are safe.

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod report;
pub mod syntax;
pub mod workspace;

pub use analysis::{
    analyze_symbol, ContextDescriber, DeadSymbol, DeadSymbolScanner, Definition,
    DefinitionLocator, ReferenceMatcher, ReferenceSite, SourcePosition, SymbolAnalysis,
    SymbolKind,
};
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{Result, SymrefError};
pub use report::{ReportFormat, Reporter};
pub use workspace::{ParsedFile, Workspace};
