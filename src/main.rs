use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use mzsweep::analysis::Analyzer;
use mzsweep::config::Config;
use mzsweep::report::{GroupBy, ReportFormat, Reporter};
use mzsweep::sweep::AssetDeleter;

/// mzsweep - Fast unused asset detection for RPG Maker MZ projects
#[derive(Parser, Debug)]
#[command(name = "mzsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project (or staging) directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional directory names to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format (defaults to the config file's setting)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show which source justified each used file
    #[arg(long)]
    show_references: bool,

    /// Group the provenance report by target file or by source file
    #[arg(long, value_enum)]
    group_by: Option<GroupByArg>,

    /// Iterate the reference sweep to a fixpoint instead of one pass
    #[arg(long)]
    fixpoint: bool,

    /// Scan source files in parallel during the reference sweep
    #[arg(long)]
    parallel: bool,

    /// Delete the unused files after analysis
    #[arg(long)]
    delete: bool,

    /// Dry run - show what would be deleted without making changes
    #[arg(long)]
    dry_run: bool,

    /// Skip the deletion confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum GroupByArg {
    #[default]
    Target,
    Source,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl From<GroupByArg> for GroupBy {
    fn from(group_by: GroupByArg) -> Self {
        match group_by {
            GroupByArg::Target => GroupBy::Target,
            GroupByArg::Source => GroupBy::Source,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("mzsweep v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_analysis(&config, &cli)
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

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude_dirs.extend(cli.exclude.clone());
    }
    if cli.fixpoint {
        config.resolve.fixpoint = true;
    }
    if cli.parallel {
        config.resolve.parallel = true;
    }

    Ok(config)
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    let format = cli.format.clone().map(ReportFormat::from).unwrap_or_else(|| {
        match config.report.format.as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Terminal,
        }
    });
    let group_by = cli.group_by.map(GroupBy::from).unwrap_or_else(|| {
        match config.report.group_by.as_str() {
            "source" => GroupBy::Source,
            _ => GroupBy::Target,
        }
    });
    let show_references = cli.show_references || config.report.show_references;

    // Step 1: run the mark/sweep resolution, with a live progress bar in
    // terminal mode
    let show_bar = matches!(format, ReportFormat::Terminal) && !cli.quiet;
    let bar = if show_bar {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut analyzer = Analyzer::new(config);
    if let Some(bar) = &bar {
        let bar = bar.clone();
        analyzer = analyzer.with_progress(Box::new(move |progress| {
            bar.set_length(progress.code_files as u64);
            bar.set_position(progress.evaluated as u64);
            bar.set_message(format!(
                "{} used / {} unused",
                progress.used, progress.unused
            ));
        }));
    }

    let analysis = analyzer.analyze(&cli.path)?;
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    // Step 2: report results
    let reporter = Reporter::new(format, cli.output.clone())
        .with_references(show_references, group_by);
    reporter.report(&analysis)?;

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    // Step 3: delete if requested
    if cli.delete {
        if !cli.dry_run && !cli.yes && !cli.quiet {
            println!();
            println!(
                "{}",
                "Deletion cannot be undone; run against a staging copy.".yellow()
            );
        }
        let deleter = AssetDeleter::new(cli.dry_run, cli.yes);
        deleter.delete(&analysis.unused)?;
    }

    Ok(())
}
