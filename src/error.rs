//! Typed errors for workspace construction and symbol queries.
//!
//! Every failure mode is terminal for the current query: there is no retry
//! or fallback. Zero references found is a success value, never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for symref operations
#[derive(Error, Debug)]
pub enum SymrefError {
    /// No declaration matching the symbol name exists in the workspace
    #[error(
        "symbol '{name}' was not found in the analyzed files\n  \
         - check the spelling (lookup is exact and case-sensitive)\n  \
         - make sure the declaring file lives under the analyzed directory\n  \
         - check that include/exclude patterns do not skip the declaring file"
    )]
    SymbolNotFound { name: String },

    /// A requested file path is not covered by the analyzed file set
    #[error(
        "file '{path}' is not part of the analyzed file set\n  \
         - the path must point at a .ts or .tsx file under the analyzed directory\n  \
         - check that include/exclude patterns do not skip it"
    )]
    FileNotInWorkspace { path: PathBuf },

    /// Malformed include/exclude glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Tree-sitter failed to produce a tree for a source file
    #[error("failed to parse {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// I/O error while reading a source or configuration file
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SymrefError>;

impl SymrefError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SymrefError::Io {
            path: path.into(),
            source,
        }
    }
}
