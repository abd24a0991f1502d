//! CLI entry point for the iceberg path counter.
//!
//! Usage:
//!   iceberg-paths count <grid.txt> [options]
//!   iceberg-paths count --stdin --format json [options]
//!   iceberg-paths generate <rows> <columns> [--density <p>] [--seed <n>]
//!   iceberg-paths experiment [options]
//!
//! Grids are read as text (`.` open, `X` iceberg, one line per row) or as
//! JSON (`{"rows": [".X", ".."]}`). Set `RUST_LOG=debug` for counter logs.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use iceberg_paths::{dyn_prog, exhaustive, run_experiment, ExperimentConfig, Grid};

#[derive(Parser)]
#[command(name = "iceberg-paths")]
#[command(about = "Count iceberg-avoiding monotone paths across a grid")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GridFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Both,
    Exhaustive,
    DynProg,
}

#[derive(Subcommand)]
enum Commands {
    /// Count paths across a grid
    Count {
        /// Path to grid file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read grid from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Input format of the grid
        #[arg(long, value_enum, default_value = "text")]
        format: GridFormat,

        /// Which counter to run
        #[arg(long, value_enum, default_value = "both")]
        algorithm: Algorithm,

        /// Also list every path as a string of R/D steps
        #[arg(long)]
        list: bool,

        /// Longest path the exhaustive counter is run on with `--algorithm both`
        #[arg(long, default_value = "20")]
        exhaustive_limit: usize,
    },

    /// Print a random grid in text format
    Generate {
        rows: usize,
        columns: usize,

        /// Probability that a cell is an iceberg
        #[arg(long, default_value = "0.2")]
        density: f64,

        /// Seed for reproducible grids
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Time both counters on random square grids of increasing size
    Experiment {
        /// Largest grid side length
        #[arg(long, default_value = "12")]
        max_size: usize,

        /// Probability that a cell is an iceberg
        #[arg(long, default_value = "0.2")]
        density: f64,

        /// Seed for grid generation
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Longest path the exhaustive counter is run on
        #[arg(long, default_value = "20")]
        exhaustive_limit: usize,
    },
}

/// Output format for a count
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountOutput {
    rows: usize,
    columns: usize,
    icebergs: usize,
    path_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    exhaustive: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dyn_prog: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    agree: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<Vec<String>>,
    time_elapsed_ms: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run a command. Returns `false` when the counters disagree.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Count {
            file,
            stdin,
            format,
            algorithm,
            list,
            exhaustive_limit,
        } => {
            let content = read_input(file, stdin)?;
            let grid = parse_grid(&content, format)?;
            let output = count(&grid, algorithm, list, exhaustive_limit)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(output.agree != Some(false))
        }

        Commands::Generate {
            rows,
            columns,
            density,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let grid = Grid::random(rows, columns, density, &mut rng)
                .context("Failed to generate grid")?;
            print!("{}", grid);
            Ok(true)
        }

        Commands::Experiment {
            max_size,
            density,
            seed,
            exhaustive_limit,
        } => {
            let config = ExperimentConfig {
                max_size,
                iceberg_density: density,
                seed,
                exhaustive_limit,
            };
            let samples = run_experiment(&config)?;
            println!("{}", serde_json::to_string_pretty(&samples)?);
            Ok(samples.iter().all(|s| s.agree != Some(false)))
        }
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file {:?}", path))
    } else {
        bail!("Must provide either a file path or --stdin");
    }
}

fn parse_grid(content: &str, format: GridFormat) -> Result<Grid> {
    match format {
        GridFormat::Text => content.parse::<Grid>().context("Error parsing grid"),
        GridFormat::Json => {
            serde_json::from_str::<Grid>(content).context("Error parsing grid JSON")
        }
    }
}

fn count(
    grid: &Grid,
    algorithm: Algorithm,
    list: bool,
    exhaustive_limit: usize,
) -> Result<CountOutput> {
    let start = Instant::now();

    let run_exhaustive = match algorithm {
        Algorithm::DynProg => false,
        Algorithm::Exhaustive => true,
        Algorithm::Both => match exhaustive::check_enumerable(grid) {
            Ok(steps) if steps > exhaustive_limit => {
                warn!(
                    "skipping exhaustive counter: path length {} exceeds limit {}",
                    steps, exhaustive_limit
                );
                false
            }
            Ok(_) => true,
            Err(e) => {
                warn!("skipping exhaustive counter: {}", e);
                false
            }
        },
    };

    let exhaustive_count = if run_exhaustive {
        Some(exhaustive::try_count_paths(grid)?)
    } else {
        None
    };

    let dyn_prog_count = if algorithm != Algorithm::Exhaustive {
        Some(dyn_prog::try_count_paths(grid)?)
    } else {
        None
    };

    let agree = match (exhaustive_count, dyn_prog_count) {
        (Some(a), Some(b)) => Some(a == b),
        _ => None,
    };

    let paths = if list {
        let paths = exhaustive::enumerate_paths(grid)?;
        Some(paths.iter().map(|p| p.to_string()).collect())
    } else {
        None
    };

    Ok(CountOutput {
        rows: grid.rows(),
        columns: grid.columns(),
        icebergs: grid.iceberg_count(),
        path_length: grid.path_length(),
        exhaustive: exhaustive_count,
        dyn_prog: dyn_prog_count,
        agree,
        paths,
        time_elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}
