//! Command-line driver: load two CSV matrices, run Tabu Search, print the
//! result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use u_qap::qap::MatrixLoader;
use u_qap::tabu::{
    Admissibility, FallbackPolicy, MemoryKind, TabuConfig, TabuRunner, TenurePolicy,
};
use u_qap::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "u-qap", version, about = "Tabu Search for the Quadratic Assignment Problem", long_about = None)]
struct Args {
    /// Flow matrix (comma-separated, one row per line)
    #[arg(long, default_value = "Flow.csv")]
    flow: PathBuf,

    /// Distance matrix (comma-separated, one row per line)
    #[arg(long, default_value = "Distance.csv")]
    distance: PathBuf,

    /// TOML file with search parameters; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Expected number of facilities
    #[arg(short = 'n', long)]
    facilities: Option<usize>,

    /// Iteration budget
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Fixed tabu tenure
    #[arg(short, long)]
    tenure: Option<usize>,

    /// Lower bound of the dynamic tenure range
    #[arg(long, requires = "tenure_max")]
    tenure_min: Option<usize>,

    /// Upper bound of the dynamic tenure range
    #[arg(long, requires = "tenure_min")]
    tenure_max: Option<usize>,

    /// Iterations between dynamic tenure draws
    #[arg(long)]
    refresh_interval: Option<usize>,

    /// plain, frequency, aspiration-global or aspiration-local
    #[arg(short, long)]
    strategy: Option<String>,

    /// least-tabu or best-overall
    #[arg(long)]
    fallback: Option<String>,

    /// Use a FIFO of this many visited permutations instead of tenure counters
    #[arg(long)]
    visited: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate the neighborhood on all cores (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Recompute every candidate cost from scratch
    #[arg(long)]
    full_eval: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    facilities: Option<usize>,
    iterations: Option<usize>,
    tenure: Option<usize>,
    tenure_min: Option<usize>,
    tenure_max: Option<usize>,
    refresh_interval: Option<usize>,
    strategy: Option<String>,
    fallback: Option<String>,
    visited: Option<usize>,
    seed: Option<u64>,
    parallel: Option<bool>,
    incremental: Option<bool>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Merges flags over file values over defaults.
fn build_config(args: &Args, file: &FileConfig) -> Result<TabuConfig, ConfigError> {
    let mut config = TabuConfig::default();

    if let Some(n) = args.iterations.or(file.iterations) {
        config = config.with_max_iterations(n);
    }

    let min = args.tenure_min.or(file.tenure_min);
    let max = args.tenure_max.or(file.tenure_max);
    let fixed = args.tenure.or(file.tenure);
    match (min, max) {
        (Some(min), Some(max)) => {
            if let Some(tenure) = fixed {
                return Err(ConfigError::ConflictingTenure { tenure, min, max });
            }
            config = config.with_tenure(TenurePolicy::Dynamic {
                min,
                max,
                refresh_interval: args.refresh_interval.or(file.refresh_interval).unwrap_or(50),
            });
        }
        (None, None) => {
            if let Some(t) = fixed {
                config = config.with_tabu_tenure(t);
            }
        }
        (min, max) => {
            return Err(ConfigError::InvalidTenureRange {
                min: min.unwrap_or(0),
                max: max.unwrap_or(0),
            });
        }
    }

    if let Some(s) = args.strategy.as_deref().or(file.strategy.as_deref()) {
        config = config.with_strategy(s.parse::<Admissibility>()?);
    }
    if let Some(s) = args.fallback.as_deref().or(file.fallback.as_deref()) {
        config = config.with_fallback(s.parse::<FallbackPolicy>()?);
    }
    if let Some(capacity) = args.visited.or(file.visited) {
        config = config.with_memory(MemoryKind::Visited { capacity });
    }
    if let Some(seed) = args.seed.or(file.seed) {
        config = config.with_seed(seed);
    }
    config = config
        .with_parallel(args.parallel || file.parallel.unwrap_or(false))
        .with_incremental(!args.full_eval && file.incremental.unwrap_or(true));

    config.validate()?;
    Ok(config)
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    enable_tracing();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };
    let config = build_config(&args, &file).context("invalid configuration")?;

    let mut loader = MatrixLoader::new();
    if let Some(n) = args.facilities.or(file.facilities) {
        config.validate_for(n).context("invalid configuration")?;
        loader = loader.with_dimension(n);
    }
    if config.parallel && !cfg!(feature = "parallel") {
        tracing::warn!("built without the `parallel` feature; evaluating sequentially");
    }

    let instance = loader
        .load_instance(&args.flow, &args.distance)
        .context("failed to load instance")?;
    tracing::info!(
        "Loaded {}x{} instance from {} and {}",
        instance.size(),
        instance.size(),
        args.flow.display(),
        args.distance.display()
    );

    let result = TabuRunner::run(&instance, &config).context("invalid configuration")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{result}");
    }
    Ok(())
}
