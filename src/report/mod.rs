mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::{DeadSymbol, SymbolAnalysis};
use miette::Result;
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for query results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    /// Report a symbol's definition and references
    pub fn report_references(&self, analysis: &SymbolAnalysis) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new().report_references(analysis),
            ReportFormat::Json => {
                JsonReporter::new(self.output_path.clone()).report_references(analysis)
            }
        }
    }

    /// Report a file's dead symbols
    pub fn report_dead(&self, file: &Path, dead: &[DeadSymbol]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new().report_dead(file, dead),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report_dead(file, dead),
        }
    }
}
