//! netchart CLI - Random Graph Visualization
//!
//! Generates a random graph, lays it out, and writes a static image plus
//! interactive Vega-Lite charts.
//!
//! Usage:
//!   netchart [OPTIONS]

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use netchart::{PlotConfig, generate_json, generate_summary, load_config, load_config_file, run};

/// netchart - Random graph to PNG and Vega-Lite charts
#[derive(Parser, Debug)]
#[command(name = "netchart")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory receiving the image and charts (default: data)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of nodes (default: 30)
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Edge probability (default: 0.25)
    #[arg(short, long)]
    probability: Option<f64>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum spring layout iterations (default: 50)
    #[arg(long)]
    iterations: Option<usize>,

    /// Resolution of the static image (default: 80)
    #[arg(long)]
    dpi: Option<f64>,

    /// Config file path (default: search for netchart.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run_cli() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Command line flags override the config file
fn apply_overrides(args: &Args, config: &mut PlotConfig) {
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(nodes) = args.nodes {
        config.graph.nodes = nodes;
    }
    if let Some(p) = args.probability {
        config.graph.edge_probability = p;
    }
    if let Some(seed) = args.seed {
        config.graph.seed = Some(seed);
    }
    if let Some(iterations) = args.iterations {
        config.layout.iterations = iterations;
    }
    if let Some(dpi) = args.dpi {
        config.output.dpi = dpi;
    }
}

fn load(args: &Args) -> Result<PlotConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&std::env::current_dir()?)?,
    };
    apply_overrides(args, &mut config);
    config.validate()?;
    Ok(config)
}

fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load(&args)?;
    let start = Instant::now();
    let output = run(&config)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "run complete");

    let mut writer = BufWriter::new(stdout().lock());
    if args.json {
        generate_json(&output, &mut writer)?;
    } else {
        generate_summary(&output, &mut writer)?;
    }
    writer.flush()?;

    Ok(())
}
