//! The immutable snapshot of parsed files every query runs against.
//!
//! A workspace is built once from a base directory and include/exclude
//! patterns, parses every selected file eagerly, and is never mutated
//! afterwards. Analyzing a different file set means building a new workspace.

use crate::analysis::SourcePosition;
use crate::config::Config;
use crate::discovery::{FileFinder, FileType};
use crate::error::{Result, SymrefError};
use crate::syntax::point_to_position;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

/// A single parsed source file
#[derive(Debug)]
pub struct ParsedFile {
    /// Absolute, lexically normalized path
    pub path: PathBuf,

    /// Path relative to the workspace base directory
    pub rel_path: PathBuf,

    /// File contents
    pub source: String,

    /// Ambient declaration file (.d.ts): never a definition source, never
    /// scanned for references
    pub is_ambient: bool,

    tree: Tree,
}

impl ParsedFile {
    /// Parse TypeScript source, selecting the TSX grammar for .tsx files
    pub fn parse(path: PathBuf, rel_path: PathBuf, source: String) -> Result<Self> {
        let mut parser = Parser::new();

        let language = match FileType::from_path(&path) {
            Some(FileType::Tsx) => tree_sitter_typescript::language_tsx(),
            _ => tree_sitter_typescript::language_typescript(),
        };

        parser
            .set_language(&language)
            .map_err(|e| SymrefError::Parse {
                file: path.clone(),
                message: format!("failed to set TypeScript language: {e:?}"),
            })?;

        let tree = parser.parse(&source, None).ok_or_else(|| SymrefError::Parse {
            file: path.clone(),
            message: "parse failed - no tree returned".to_string(),
        })?;

        let is_ambient = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(".d.ts"))
            .unwrap_or(false);

        Ok(Self {
            path,
            rel_path,
            source,
            is_ambient,
            tree,
        })
    }

    /// Root node of the parsed tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// 1-based position of a node, using the workspace-relative path
    pub fn position_of(&self, node: Node) -> SourcePosition {
        point_to_position(&self.rel_path, node.start_position())
    }
}

/// Immutable, once-built collection of parsed files.
///
/// Files are kept in lexicographic relative-path order; that order is the
/// enumeration order every query sees, which makes first-match lookups
/// deterministic.
pub struct Workspace {
    base: PathBuf,
    files: Vec<ParsedFile>,
    index: HashMap<PathBuf, usize>,
}

impl Workspace {
    /// Discover, read and parse every selected file under `base`
    pub fn build(base: &Path, config: &Config) -> Result<Self> {
        let base = absolute(base)?;
        let finder = FileFinder::new(config)?;
        let sources = finder.find_files(&base)?;

        let mut files = Vec::with_capacity(sources.len());
        let mut index = HashMap::new();

        for src in sources {
            let path = normalize_path(&src.path);
            if index.contains_key(&path) {
                continue; // already loaded
            }
            let contents =
                std::fs::read_to_string(&src.path).map_err(|e| SymrefError::io(&src.path, e))?;
            let parsed = ParsedFile::parse(path.clone(), src.rel_path, contents)?;
            index.insert(path, files.len());
            files.push(parsed);
        }

        debug!("Workspace built with {} parsed files", files.len());
        Ok(Self { base, files, index })
    }

    /// Build a workspace from in-memory sources. Used by tests and embedders;
    /// paths are taken relative to `base` and nothing touches the filesystem.
    pub fn from_sources(base: &Path, sources: &[(&str, &str)]) -> Result<Self> {
        let base = normalize_path(base);
        let mut named: Vec<(&str, &str)> = sources.to_vec();
        named.sort_by(|a, b| a.0.cmp(b.0));
        named.dedup_by(|a, b| a.0 == b.0);

        let mut files = Vec::with_capacity(named.len());
        let mut index = HashMap::new();

        for (rel, contents) in named {
            let rel_path = PathBuf::from(rel);
            let path = normalize_path(&base.join(&rel_path));
            let parsed = ParsedFile::parse(path.clone(), rel_path, contents.to_string())?;
            index.insert(path, files.len());
            files.push(parsed);
        }

        Ok(Self { base, files, index })
    }

    /// Base directory the workspace was built from
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// All parsed files in enumeration order
    pub fn files(&self) -> impl Iterator<Item = &ParsedFile> {
        self.files.iter()
    }

    /// Number of parsed files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether a path (absolute, or relative to the base) is part of the set
    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(&self.resolve_key(path))
    }

    /// Look up a parsed file by path, or fail with `FileNotInWorkspace`
    pub fn file(&self, path: &Path) -> Result<&ParsedFile> {
        self.index
            .get(&self.resolve_key(path))
            .map(|&i| &self.files[i])
            .ok_or_else(|| SymrefError::FileNotInWorkspace {
                path: path.to_path_buf(),
            })
    }

    fn resolve_key(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.base.join(path))
        }
    }
}

/// Lexical path normalization: resolves `.` and `..` components without
/// touching the filesystem, so unsaved/in-memory paths normalize too.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }
    let cwd = std::env::current_dir().map_err(|e| SymrefError::io(path, e))?;
    Ok(normalize_path(&cwd.join(path)))
}
