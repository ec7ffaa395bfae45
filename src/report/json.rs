use crate::analysis::{DeadSymbol, SymbolAnalysis};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report_references(&self, analysis: &SymbolAnalysis) -> Result<()> {
        let report = ReferencesReport {
            version: "1.0",
            symbol: &analysis.name,
            kind: analysis.kind.display_name(),
            definition: Site {
                file: analysis.definition.position.file.to_string_lossy().to_string(),
                line: analysis.definition.position.line,
                column: analysis.definition.position.column,
                context: analysis.definition.context.clone(),
            },
            reference_count: analysis.references.len(),
            has_references: analysis.has_references,
            references: analysis
                .references
                .iter()
                .map(|r| Site {
                    file: r.position.file.to_string_lossy().to_string(),
                    line: r.position.line,
                    column: r.position.column,
                    context: r.context.clone(),
                })
                .collect(),
        };
        self.emit(&report)
    }

    pub fn report_dead(&self, file: &Path, dead: &[DeadSymbol]) -> Result<()> {
        let report = DeadReport {
            version: "1.0",
            file: file.to_string_lossy().to_string(),
            total: dead.len(),
            symbols: dead,
        };
        self.emit(&report)
    }

    fn emit<T: Serialize>(&self, report: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct ReferencesReport<'a> {
    version: &'static str,
    symbol: &'a str,
    kind: &'static str,
    definition: Site,
    reference_count: usize,
    has_references: bool,
    references: Vec<Site>,
}

#[derive(Serialize)]
struct Site {
    file: String,
    line: usize,
    column: usize,
    context: String,
}

#[derive(Serialize)]
struct DeadReport<'a> {
    version: &'static str,
    file: String,
    total: usize,
    symbols: &'a [DeadSymbol],
}
