use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

use symref::analysis::{analyze_symbol, DeadSymbolScanner};
use symref::report::{ReportFormat, Reporter};
use symref::{Config, SymrefError, Workspace};

/// symref - Find symbol cross-references and dead symbols in TypeScript projects
#[derive(Parser, Debug)]
#[command(name = "symref")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the definition of a symbol and every reference to it
    Refs {
        /// Symbol name (exact, case-sensitive)
        symbol: String,

        #[command(flatten)]
        workspace: WorkspaceArgs,

        /// Also report references inside the declaring file
        #[arg(long)]
        include_internal: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List a file's declarations that nothing else references
    Dead {
        /// File to scan (absolute, or relative to the analyzed directory)
        file: PathBuf,

        #[command(flatten)]
        workspace: WorkspaceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct WorkspaceArgs {
    /// Base directory to analyze
    #[arg(short = 'd', long, default_value = ".")]
    dir: PathBuf,

    /// tsconfig-style project file whose include/exclude arrays apply
    #[arg(short = 'p', long)]
    project: Option<PathBuf>,

    /// Path to a symref configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patterns to include (can be specified multiple times)
    #[arg(long)]
    include: Vec<String>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(long)]
    exclude: Vec<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("symref v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Refs {
            symbol,
            workspace,
            include_internal,
            output,
        } => run_refs(&symbol, &workspace, include_internal, &output),
        Command::Dead {
            file,
            workspace,
            output,
        } => run_dead(&file, &workspace, &output),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &WorkspaceArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        Config::from_file(config_path).into_diagnostic()?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&args.dir).into_diagnostic()?
    };

    if let Some(project) = &args.project {
        config.apply_project_file(project).into_diagnostic()?;
    }

    // Override with CLI arguments
    if !args.include.is_empty() {
        config.include.extend(args.include.clone());
    }
    if !args.exclude.is_empty() {
        config.exclude.extend(args.exclude.clone());
    }

    Ok(config)
}

fn build_workspace(args: &WorkspaceArgs) -> Result<Workspace> {
    let config = load_config(args)?;

    info!("Building workspace from {}", args.dir.display());
    let workspace = Workspace::build(&args.dir, &config).into_diagnostic()?;
    info!("Parsed {} files", workspace.len());

    Ok(workspace)
}

fn run_refs(
    symbol: &str,
    args: &WorkspaceArgs,
    include_internal: bool,
    output: &OutputArgs,
) -> Result<()> {
    let workspace = build_workspace(args)?;

    let analysis = analyze_symbol(&workspace, symbol, include_internal).into_diagnostic()?;

    let reporter = Reporter::new(output.format.clone().into(), output.output.clone());
    reporter.report_references(&analysis)
}

fn run_dead(file: &PathBuf, args: &WorkspaceArgs, output: &OutputArgs) -> Result<()> {
    let workspace = build_workspace(args)?;
    let scanner = DeadSymbolScanner::new(&workspace);

    // The path may be given relative to the analyzed directory or to the
    // current directory; try both before failing.
    let dead = match scanner.scan(file) {
        Ok(dead) => dead,
        Err(err @ SymrefError::FileNotInWorkspace { .. }) if !file.is_absolute() => {
            let from_cwd = std::env::current_dir().into_diagnostic()?.join(file);
            match scanner.scan(&from_cwd) {
                Ok(dead) => dead,
                Err(_) => return Err(err).into_diagnostic(),
            }
        }
        Err(err) => return Err(err).into_diagnostic(),
    };

    let reporter = Reporter::new(output.format.clone().into(), output.output.clone());
    reporter.report_dead(file, &dead)
}
