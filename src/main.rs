use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

use keywordtrace::analysis::{InspectionPolicy, KeywordInspector, RootCallerResolver};
use keywordtrace::config::Config;
use keywordtrace::keywords::KeywordSet;
use keywordtrace::program::{AnalysisFacade, ModelLoader};
use keywordtrace::report::{AuditResults, ReportFormat, Reporter};

/// keywordtrace - find keywords in an app's IR and trace them to entry points
#[derive(Parser, Debug)]
#[command(name = "keywordtrace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Exported program model (JSON or YAML)
    model: PathBuf,

    /// Keyword list, one keyword per line
    keywords: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record and print statements using the container symbol (HashMap by default)
    #[arg(short = 'm', long)]
    record_container_symbol: bool,

    /// Disable API filtering, inspect statements regardless of the API they invoke
    #[arg(short = 'a', long)]
    all_statements: bool,

    /// Only inspect APIs declared in libraries (the library list may be incomplete)
    #[arg(short = 'p', long)]
    libraries_only: bool,

    /// Container symbol recorded with -m
    #[arg(long, value_name = "SYMBOL")]
    container_symbol: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print root caller methods under each hit
    #[arg(long)]
    no_roots: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
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

    info!("keywordtrace v{}", env!("CARGO_PKG_VERSION"));

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

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        let cwd = std::env::current_dir().into_diagnostic()?;
        Config::from_default_locations(&cwd)?
    };

    // Override with CLI arguments
    if cli.record_container_symbol {
        config.inspection.record_container_symbol = true;
    }
    if cli.all_statements {
        config.inspection.interested_api_only = false;
    }
    if cli.libraries_only {
        config.inspection.api_in_libraries_only = true;
    }
    if let Some(symbol) = &cli.container_symbol {
        config.inspection.container_symbol = symbol.clone();
    }

    Ok(config)
}

fn report_format(config: &Config, cli: &Cli) -> Result<ReportFormat> {
    if let Some(format) = &cli.format {
        return Ok(format.clone().into());
    }

    ReportFormat::from_name(&config.report.format)
        .ok_or_else(|| miette::miette!("Unknown report format in config: {}", config.report.format))
}

fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn ensure_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        return Err(miette::miette!("{} doesn't exist: {}", what, path.display()));
    }
    Ok(())
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();
    let format = report_format(config, cli)?;
    let quiet = cli.quiet || format == ReportFormat::Json;

    ensure_exists(&cli.model, "Program model")?;
    ensure_exists(&cli.keywords, "Keyword list")?;

    // Step 1: Load program model
    info!("Loading program model from {:?}...", cli.model);
    let pb = spinner("Loading program model...", quiet);
    let loader = ModelLoader::new(&config.classification);
    let program = loader
        .load(&cli.model)
        .into_diagnostic()
        .wrap_err("Failed to load program model")?;
    pb.finish_and_clear();

    // Step 2: Load keyword list
    let keywords = KeywordSet::load(&cli.keywords)
        .into_diagnostic()
        .wrap_err("Failed to load keyword list")?;
    info!("Loaded {} keywords", keywords.len());

    if keywords.is_empty() && !quiet {
        println!("{}", "Keyword list is empty, no statements can match.".yellow());
    }

    // Step 3: Inspect statements
    let policy = InspectionPolicy::from(&config.inspection);
    let pb = spinner("Inspecting statements...", quiet);
    let inspector = KeywordInspector::inspect(&program, &keywords, &policy);
    pb.finish_and_clear();

    // Step 4: Resolve root callers
    let pb = spinner("Resolving root callers...", quiet);
    let resolver = RootCallerResolver::resolve(&program, inspector.hits());
    pb.finish_and_clear();

    // Step 5: Report
    let reporter = Reporter::new(format, cli.output.clone()).with_roots(!cli.no_roots);
    reporter.report(&AuditResults {
        program: &program,
        inspector: &inspector,
        resolver: &resolver,
        policy: &policy,
    })?;

    if !quiet {
        let elapsed = start_time.elapsed();
        println!(
            "{}",
            format!(
                "⏱  Inspected {} methods in {:.2}s",
                program.method_count(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(())
}
