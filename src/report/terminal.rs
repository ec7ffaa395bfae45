use crate::analysis::{DeadSymbol, SymbolAnalysis};
use colored::Colorize;
use miette::Result;
use std::path::Path;

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_references(&self, analysis: &SymbolAnalysis) -> Result<()> {
        println!(
            "{} {} {}",
            analysis.kind.display_name().cyan().bold(),
            analysis.name.bold(),
            format!(
                "defined at {} ({})",
                analysis.definition.position, analysis.definition.context
            )
            .dimmed()
        );
        println!();

        if analysis.references.is_empty() {
            // a valid outcome, not an error
            println!("{}", "No references found.".yellow());
            return Ok(());
        }

        println!(
            "{}",
            format!("Found {} reference(s):", analysis.references.len())
                .green()
                .bold()
        );
        for reference in &analysis.references {
            println!(
                "  {} {} {}",
                "→".dimmed(),
                reference.position,
                format!("({})", reference.context).dimmed()
            );
        }

        Ok(())
    }

    pub fn report_dead(&self, file: &Path, dead: &[DeadSymbol]) -> Result<()> {
        if dead.is_empty() {
            println!(
                "{}",
                format!("No dead symbols found in {}!", file.display())
                    .green()
                    .bold()
            );
            return Ok(());
        }

        println!(
            "{}",
            format!(
                "Found {} symbol(s) with no external references in {}:",
                dead.len(),
                file.display()
            )
            .yellow()
            .bold()
        );
        println!();

        for entry in dead {
            println!(
                "  {} {} {} {}",
                "○".dimmed(),
                entry.kind.display_name().cyan(),
                entry.name,
                format!("({})", entry.context).dimmed()
            );
        }

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
