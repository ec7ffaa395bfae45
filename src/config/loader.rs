use crate::error::{Result, SymrefError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a symref analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Include patterns; when empty, every .ts/.tsx file under the base
    /// directory is analyzed
    pub include: Vec<String>,

    /// Exclude patterns, applied after includes
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include: vec![],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
                "**/coverage/**".to_string(),
            ],
        }
    }
}

/// The subset of a tsconfig-style project file we honor
#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SymrefError::io(path, e))?;

        toml::from_str(&contents).map_err(|e| SymrefError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [".symref.toml", "symref.toml"];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Merge include/exclude arrays from a tsconfig-style JSON project file.
    /// Patterns from the project file are appended, not replacing.
    pub fn apply_project_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| SymrefError::io(path, e))?;

        let project: ProjectFile =
            serde_json::from_str(&contents).map_err(|e| SymrefError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        self.include.extend(project.include);
        self.exclude.extend(project.exclude);
        Ok(())
    }
}
