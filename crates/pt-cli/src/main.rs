mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pt_core::{
    Bundle, Histogram, ONE_THIRD_MARKER, RngTensionSource, export_json, generate_data,
    spiral_points, stability_curve,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::RunConfig;

#[derive(Parser)]
#[command(name = "pt", about = "Prime tension engine: orphan primes, tension and stability")]
struct Cli {
    /// TOML run config (falls back to PT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for weak-tension samples (falls back to PT_SEED, else OS entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sieve and classify primes below a limit
    Generate {
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Orphan density against x / ln(x)^2
    Stability {
        #[arg(long)]
        limit: Option<u64>,

        #[arg(long)]
        max_checkpoint: Option<u64>,

        /// Print every checkpoint
        #[arg(long)]
        points: bool,
    },

    /// Histogram of tension values
    Tension {
        #[arg(long)]
        limit: Option<u64>,

        #[arg(long)]
        bins: Option<usize>,
    },

    /// Square-root prime spiral coordinates
    Spiral {
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Write every data product to a JSON file
    Export {
        /// Output file path
        path: PathBuf,

        #[arg(long)]
        limit: Option<u64>,

        #[arg(long)]
        max_checkpoint: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn tension_source(config: &RunConfig, cli: &Cli) -> Result<RngTensionSource<SmallRng>> {
    let rng = match config.seed(cli.seed)? {
        Some(seed) => {
            tracing::debug!("seeding tension samples with {seed}");
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_os_rng(),
    };
    Ok(RngTensionSource::new(rng))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RunConfig::discover(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded run config");

    match &cli.command {
        Commands::Generate { limit } => cmd_generate(&cli, &config, *limit),
        Commands::Stability {
            limit,
            max_checkpoint,
            points,
        } => cmd_stability(&cli, &config, *limit, *max_checkpoint, *points),
        Commands::Tension { limit, bins } => cmd_tension(&cli, &config, *limit, *bins),
        Commands::Spiral { limit } => cmd_spiral(&config, *limit),
        Commands::Export {
            path,
            limit,
            max_checkpoint,
        } => cmd_export(&cli, &config, path, *limit, *max_checkpoint),
    }
}

fn cmd_generate(cli: &Cli, config: &RunConfig, limit: Option<u64>) -> Result<()> {
    let limit = config.limit(limit);
    tracing::info!("generating data up to {limit}");

    let mut source = tension_source(config, cli)?;
    let data = generate_data(limit, &mut source).context("failed to generate data")?;

    println!("limit:      {}", data.limit);
    println!("primes:     {}", data.primes().len());
    println!("orphans:    {}", data.orphans().len());
    println!("tensions:   {}", data.tensions().len());
    println!("orphan %:   {:.3}", data.orphan_share() * 100.0);
    Ok(())
}

fn cmd_stability(
    cli: &Cli,
    config: &RunConfig,
    limit: Option<u64>,
    max_checkpoint: Option<u64>,
    points: bool,
) -> Result<()> {
    let max_checkpoint = config.max_checkpoint(max_checkpoint);
    let limit = config.limit(limit);
    if limit < max_checkpoint {
        tracing::warn!(
            "limit {limit} is below max checkpoint {max_checkpoint}; later checkpoints see no new orphans"
        );
    }
    tracing::info!("generating stability curve up to {max_checkpoint}");

    let mut source = tension_source(config, cli)?;
    let data = generate_data(limit, &mut source).context("failed to generate data")?;
    let curve =
        stability_curve(data.orphans(), max_checkpoint).context("failed to build stability curve")?;
    tracing::debug!("{} orphans over {} checkpoints", data.orphans().len(), curve.len());

    if points {
        for p in curve.points() {
            println!(
                "{}\t{}\t{:.6}\t{:.6}",
                p.checkpoint, p.actual, p.ratio, p.absolute_error
            );
        }
    }

    println!("checkpoints: {}", curve.len());
    if let Some(last) = curve.last() {
        println!(
            "final:       cp={} actual={} ratio={:.4} error={:.4}",
            last.checkpoint, last.actual, last.ratio, last.absolute_error
        );
    }
    println!("mean ratio:  {:.4}", curve.mean_ratio());
    println!("mean error:  {:.4}", curve.mean_absolute_error());
    Ok(())
}

fn cmd_tension(
    cli: &Cli,
    config: &RunConfig,
    limit: Option<u64>,
    bins: Option<usize>,
) -> Result<()> {
    let limit = config.tension_limit(limit);
    let bins = config.bins(bins);
    tracing::info!("generating tension histogram up to {limit}");

    let mut source = tension_source(config, cli)?;
    let data = generate_data(limit, &mut source).context("failed to generate data")?;
    let hist = Histogram::from_values(data.tensions(), bins).context("failed to bin tensions")?;

    println!("tensions:   {}", hist.total());
    for (i, count) in hist.counts().iter().enumerate() {
        let edges = hist.edges();
        println!("[{:.4}, {:.4})\t{count}", edges[i], edges[i + 1]);
    }
    let marker = hist
        .bin_of(ONE_THIRD_MARKER)
        .map(|b| hist.counts()[b])
        .unwrap_or(0);
    println!("at marker:  {marker}");
    Ok(())
}

fn cmd_spiral(config: &RunConfig, limit: Option<u64>) -> Result<()> {
    let limit = config.spiral_limit(limit);
    tracing::info!("generating prime spiral up to {limit}");

    let points = spiral_points(limit).context("failed to build spiral")?;
    let primes = points.iter().filter(|p| p.is_prime).count();
    let z_max = points.last().map(|p| p.z).unwrap_or(0.0);

    println!("points:     {}", points.len());
    println!("primes:     {primes}");
    println!("height:     {z_max:.2}");
    Ok(())
}

fn cmd_export(
    cli: &Cli,
    config: &RunConfig,
    path: &Path,
    limit: Option<u64>,
    max_checkpoint: Option<u64>,
) -> Result<()> {
    let limit = config.limit(limit);
    let max_checkpoint = config.max_checkpoint(max_checkpoint);
    tracing::info!("exporting data up to {limit}");

    let mut source = tension_source(config, cli)?;
    let data = generate_data(limit, &mut source).context("failed to generate data")?;
    let bundle = Bundle::build(data, max_checkpoint).context("failed to build bundle")?;

    let json = export_json(&bundle).context("failed to serialize bundle")?;
    std::fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;

    println!("exported to {}", path.display());
    Ok(())
}
