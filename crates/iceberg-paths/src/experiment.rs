//! Timing experiment comparing both counters on random square grids.

use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{CountError, GridError};
use crate::grid::Grid;
use crate::{dyn_prog, exhaustive};

/// Configuration for the experiment
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Largest side length `n` of the `n x n` grids
    pub max_size: usize,
    /// Probability that a cell is an iceberg
    pub iceberg_density: f64,
    /// Seed for grid generation
    pub seed: u64,
    /// Skip the exhaustive counter above this path length
    pub exhaustive_limit: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_size: 12,
            iceberg_density: 0.2,
            seed: 42,
            exhaustive_limit: 20,
        }
    }
}

/// Measurements for one grid size
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentSample {
    pub size: usize,
    pub icebergs: usize,
    pub dyn_prog_count: u64,
    pub dyn_prog_micros: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaustive_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaustive_micros: Option<u64>,
    /// `None` when the exhaustive counter was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agree: Option<bool>,
}

/// Errors that stop an experiment
#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentError {
    Grid(GridError),
    Count(CountError),
}

impl std::fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperimentError::Grid(e) => write!(f, "grid generation failed: {}", e),
            ExperimentError::Count(e) => write!(f, "counting failed: {}", e),
        }
    }
}

impl std::error::Error for ExperimentError {}

impl From<GridError> for ExperimentError {
    fn from(e: GridError) -> Self {
        ExperimentError::Grid(e)
    }
}

impl From<CountError> for ExperimentError {
    fn from(e: CountError) -> Self {
        ExperimentError::Count(e)
    }
}

/// Elapsed microseconds, saturating at `u64::MAX`
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Run both counters on random `n x n` grids for `n` in `1..=max_size`
pub fn run_experiment(config: &ExperimentConfig) -> Result<Vec<ExperimentSample>, ExperimentError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(config.max_size);

    for size in 1..=config.max_size {
        let grid = Grid::random(size, size, config.iceberg_density, &mut rng)?;

        let start = Instant::now();
        let dyn_prog_count = dyn_prog::try_count_paths(&grid)?;
        let dyn_prog_micros = micros(start.elapsed());

        let steps = grid.path_length();
        let (exhaustive_count, exhaustive_micros) =
            if steps <= config.exhaustive_limit.min(exhaustive::MAX_ENUMERABLE_STEPS) {
                let start = Instant::now();
                let count = exhaustive::try_count_paths(&grid)?;
                (Some(count), Some(micros(start.elapsed())))
            } else {
                (None, None)
            };

        let agree = exhaustive_count.map(|count| count == dyn_prog_count);
        if agree == Some(false) {
            warn!(
                "counters disagree on {}x{} grid: exhaustive {:?}, dyn-prog {}",
                size, size, exhaustive_count, dyn_prog_count
            );
        }
        info!(
            "n={} icebergs={} dyn-prog={} ({}us) exhaustive={:?} ({:?}us)",
            size,
            grid.iceberg_count(),
            dyn_prog_count,
            dyn_prog_micros,
            exhaustive_count,
            exhaustive_micros
        );

        samples.push(ExperimentSample {
            size,
            icebergs: grid.iceberg_count(),
            dyn_prog_count,
            dyn_prog_micros,
            exhaustive_count,
            exhaustive_micros,
            agree,
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experiment_counters_agree() {
        let config = ExperimentConfig {
            max_size: 8,
            iceberg_density: 0.25,
            seed: 3,
            exhaustive_limit: 14,
        };
        let samples = run_experiment(&config).unwrap();
        assert_eq!(samples.len(), 8);
        for sample in &samples {
            assert_eq!(sample.agree, Some(true), "size {}", sample.size);
        }
    }

    #[test]
    fn test_exhaustive_skipped_above_limit() {
        let config = ExperimentConfig {
            max_size: 6,
            iceberg_density: 0.0,
            seed: 1,
            exhaustive_limit: 6,
        };
        let samples = run_experiment(&config).unwrap();
        // n=4 has 6 steps, n=5 has 8
        assert!(samples[3].exhaustive_count.is_some());
        assert!(samples[4].exhaustive_count.is_none());
        assert!(samples[4].agree.is_none());
        // Open grids count central binomial coefficients
        assert_eq!(samples[5].dyn_prog_count, 252);
    }

    #[test]
    fn test_micros_saturates() {
        assert_eq!(micros(Duration::from_millis(3)), 3_000);
        assert_eq!(micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_invalid_density() {
        let config = ExperimentConfig {
            iceberg_density: -0.5,
            ..Default::default()
        };
        assert_eq!(
            run_experiment(&config).unwrap_err(),
            ExperimentError::Grid(GridError::InvalidDensity(-0.5))
        );
    }
}
