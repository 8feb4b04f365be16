//! barcut - CLI tool to pack bar pieces and print the laser cut plan.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use barcut_rs::config::DEFAULT_MAX_ITERATIONS;
use barcut_rs::{
    parse_lengths, parse_parts_file, plan_parts, plan_parts_file, validate_parts, validate_plan,
    LocalSearchConfig, Part, PackingStrategy, PlanConfig, SwapPolicy,
};

/// Packing algorithm.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// First-Fit-Decreasing
    Ffd,
    /// Best-Fit-Decreasing
    Bfd,
    /// First-Fit-Decreasing followed by swap local search
    Optimized,
}

impl From<Strategy> for PackingStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Ffd => PackingStrategy::FirstFitDecreasing,
            Strategy::Bfd => PackingStrategy::BestFitDecreasing,
            Strategy::Optimized => PackingStrategy::Optimized,
        }
    }
}

/// Pack pieces into stock bars and print the laser cut plan.
#[derive(Parser, Debug)]
#[command(name = "barcut")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Parts file (`length, arc_start, arc_end, hole, ...` per line)
    #[arg(short, long, required_unless_present = "lengths")]
    input: Option<PathBuf>,

    /// Plain comma-separated piece lengths instead of a parts file
    #[arg(short, long, conflicts_with = "input")]
    lengths: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stock bar length
    #[arg(short, long, default_value = "100")]
    stock: f64,

    /// Bar width
    #[arg(short, long, default_value = "10")]
    width: f64,

    /// Gap between bars
    #[arg(short, long, default_value = "5")]
    gap: f64,

    /// Hole radius
    #[arg(short, long, default_value = "1.5")]
    radius: f64,

    /// Packing algorithm
    #[arg(long, value_enum, default_value = "optimized")]
    strategy: Strategy,

    /// Skip the cuts at both bar ends
    #[arg(long)]
    no_end_cut: bool,

    /// Ceiling on local search passes
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Only accept swaps that move material toward fuller bars
    #[arg(long)]
    improving: bool,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output packing and plan as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = PlanConfig::new(args.stock, args.width, args.gap, args.radius)
        .with_end_cut(!args.no_end_cut);

    let parts: Vec<Part> = match (&args.input, &args.lengths) {
        (Some(path), _) => {
            info!("Processing: {}", path.display());
            parse_parts_file(path)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        (None, Some(list)) => parse_lengths(list)
            .context("Failed to parse lengths")?
            .into_iter()
            .map(Part::new)
            .collect(),
        (None, None) => anyhow::bail!("Either --input or --lengths is required"),
    };

    info!("Parsed {} part(s)", parts.len());

    // Validate
    let validation = validate_parts(&parts, &config)?;

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let policy = if args.improving {
        SwapPolicy::Improving
    } else {
        SwapPolicy::Unconditional
    };
    let search = LocalSearchConfig::default()
        .with_max_iterations(args.max_iterations)
        .with_policy(policy);

    let strategy = args.strategy.into();
    let job = match &args.input {
        Some(path) => plan_parts_file(path, &config, strategy, search)
            .with_context(|| format!("Failed to plan {}", path.display()))?,
        None => plan_parts(&parts, &config, strategy, search)
            .with_context(|| format!("Failed to plan {} part(s)", parts.len()))?,
    };

    info!(
        "{}: {} bar(s) used, lower bound {}, utilization {:.1}%",
        job.strategy,
        job.packing.len(),
        job.lower_bound,
        job.packing.utilization(config.stock_length) * 100.0
    );
    for (idx, bin) in job.packing.iter().enumerate() {
        info!(
            "  Bar {}: {:?} (load {}, waste {})",
            idx + 1,
            bin.pieces(),
            bin.load(),
            bin.waste(config.stock_length)
        );
    }

    let plan_check = validate_plan(&job.plan, &config)?;
    for err in &plan_check.errors {
        error!("{}", err);
    }

    let rendered = if args.json {
        serde_json::to_string_pretty(&job)?
    } else {
        job.plan.to_string()
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
