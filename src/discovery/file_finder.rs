use crate::config::Config;
use crate::error::{Result, SymrefError};
use glob::Pattern;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Type of source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Plain TypeScript (.ts), including ambient .d.ts declarations
    TypeScript,
    /// TypeScript with JSX (.tsx)
    Tsx,
}

impl FileType {
    /// Determine file type from path
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" => Some(FileType::TypeScript),
            "tsx" => Some(FileType::Tsx),
            _ => None,
        }
    }
}

/// A discovered source file, not yet parsed
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path to the file
    pub path: PathBuf,

    /// Path relative to the analyzed base directory
    pub rel_path: PathBuf,

    /// Type of source file
    pub file_type: FileType,
}

/// File finder for discovering TypeScript sources under a base directory.
///
/// Walks the tree gitignore-aware, then filters with the configured
/// include/exclude glob patterns. Patterns are matched against the path
/// relative to the base directory.
#[derive(Debug)]
pub struct FileFinder {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileFinder {
    /// Compile the configured patterns. Fails with `InvalidPattern` on a
    /// malformed glob.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(&config.include)?,
            exclude: compile_patterns(&config.exclude)?,
        })
    }

    /// Find all TypeScript source files under the given directory, sorted by
    /// relative path. The sorted order is the workspace enumeration order.
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        debug!("Scanning for files in: {}", root.display());

        let walker = WalkBuilder::new(root)
            .hidden(true) // Skip hidden files
            .git_ignore(true) // Respect .gitignore
            .git_global(true) // Respect global gitignore
            .git_exclude(true) // Respect .git/info/exclude
            .ignore(true) // Respect .ignore files
            .parents(true) // Check parent directories for ignore files
            .follow_links(false) // Don't follow symlinks
            .build();

        let mut files: Vec<SourceFile> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();
                let file_type = FileType::from_path(path)?;

                let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
                if !self.is_selected(&rel_path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                trace!("Found {:?}: {}", file_type, path.display());
                Some(SourceFile {
                    path: path.to_path_buf(),
                    rel_path,
                    file_type,
                })
            })
            .collect();

        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        files.dedup_by(|a, b| a.path == b.path);

        debug!("Found {} files", files.len());
        Ok(files)
    }

    /// Check a base-relative path against the include/exclude patterns
    pub fn is_selected(&self, rel_path: &Path) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|p| p.matches_path(rel_path)) {
            return false;
        }
        !self.exclude.iter().any(|p| p.matches_path(rel_path))
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| SymrefError::InvalidPattern {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}
