//! bench-report CLI - Benchmark results dashboard
//!
//! Runs the same pipeline as the web dashboard against local files or
//! http(s) URLs and writes a static report.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use bench_report::{
    generate,
    html::{self, ReportConfig},
    source::Source,
    summary,
};
use bench_report_core::{Controller, MemoryLocation, Metric, Params};

/// bench-report: chart benchmark timings by command and input size
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a static HTML report for one view
    Render(RenderArgs),

    /// Print the averaged results as a table
    Averages(AveragesArgs),

    /// Write `line,message` rows, the benchmarked workload
    Generate(GenerateArgs),

    /// Write a synthetic results file for trying out the dashboard
    Sample(SampleArgs),
}

/// View selection, as a query string plus optional overrides
#[derive(Args, Debug)]
struct ViewArgs {
    /// View query string (e.g. "file=report.csv&metric=sys")
    #[arg(short, long, env = "BENCH_REPORT_QUERY", default_value = "")]
    query: String,

    /// Results file (overrides `file` in the query)
    #[arg(short, long)]
    file: Option<String>,

    /// Metric to plot: user, sys or maxrss
    #[arg(short, long)]
    metric: Option<Metric>,

    /// Series labels to start hidden (comma-separated)
    #[arg(long, value_delimiter = ',')]
    hide: Vec<String>,

    /// Language prefixes to leave out (comma-separated)
    #[arg(long, value_delimiter = ',')]
    without: Vec<String>,

    /// Directory relative file names are resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output directory for the report
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Report title
    #[arg(long, default_value = "Benchmark Results")]
    title: String,
}

#[derive(Parser, Debug)]
struct AveragesArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Print the chart configuration as JSON instead of a table
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// File to write
    filename: PathBuf,

    /// Number of rows
    n: usize,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// File to write
    #[arg(short, long, default_value = "report.csv")]
    output: PathBuf,

    /// Runs per command and size
    #[arg(long, default_value = "5")]
    runs: usize,

    /// Input sizes (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [1_000u64, 10_000, 100_000, 1_000_000])]
    sizes: Vec<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Render(args) => render_command(args).await,
        Commands::Averages(args) => averages_command(args).await,
        Commands::Generate(args) => generate_command(args),
        Commands::Sample(args) => sample_command(args),
    }
}

/// Build a controller from the view arguments and run the pipeline once
async fn run_view(view: &ViewArgs) -> Result<Controller<MemoryLocation>> {
    let mut params = Params::from_location(MemoryLocation::new(view.query.as_str()));

    if let Some(file) = &view.file {
        params.set_file(file);
    }
    if let Some(metric) = view.metric {
        params.set_metric(metric);
    }
    for label in &view.hide {
        params.hide_command(label)?;
    }
    for prefix in &view.without {
        params.disable_language(prefix)?;
    }

    info!("View: {}", summary::describe(params.state()));
    debug!("Query: ?{}", params.state().to_query());

    let source = Source::new(&view.base_dir);
    let mut controller = Controller::new(params);
    controller.run(&source).await;

    if controller.config().is_some() {
        return Ok(controller);
    }

    match controller.error().cloned() {
        Some(e) => Err(e).with_context(|| {
            format!(
                "Failed to load {}",
                controller.params().file().unwrap_or_default()
            )
        }),
        None => anyhow::bail!("No results file selected: pass --file or file=... in --query"),
    }
}

/// Render the HTML report
async fn render_command(args: RenderArgs) -> Result<()> {
    let controller = run_view(&args.view).await?;
    let state = controller.params().state();
    let config = controller
        .config()
        .context("Pipeline finished without a chart")?;

    let report = ReportConfig {
        title: args.title,
        output_dir: args.output_dir.to_string_lossy().to_string(),
    };

    let base_path = std::env::current_dir()?;
    html::write_report(config, state, &report, &base_path)
        .with_context(|| "Failed to write report")?;

    info!(
        "Report with {} series written to {:?}",
        config.datasets.len(),
        args.output_dir.join("index.html")
    );
    println!("?{}", state.to_query());

    Ok(())
}

/// Print averaged results
async fn averages_command(args: AveragesArgs) -> Result<()> {
    let controller = run_view(&args.view).await?;
    let state = controller.params().state();

    if args.json {
        let config = controller
            .config()
            .context("Pipeline finished without a chart")?;
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        let averaged = controller
            .averaged()
            .context("Pipeline finished without results")?;
        println!("{}", summary::averages_table(averaged, state));
    }

    Ok(())
}

/// Write the `line,message` workload file
fn generate_command(args: GenerateArgs) -> Result<()> {
    generate::write_messages(&args.filename, args.n)
        .with_context(|| format!("Failed to write {:?}", args.filename))?;
    Ok(())
}

/// Write a synthetic results file
fn sample_command(args: SampleArgs) -> Result<()> {
    if args.runs == 0 || args.sizes.is_empty() {
        anyhow::bail!("--runs and --sizes must be non-empty");
    }

    generate::write_sample(&args.output, args.runs, &args.sizes)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    println!("Wrote {}", args.output.display());
    println!("To view: bench-report render --file {}", args.output.display());
    Ok(())
}
