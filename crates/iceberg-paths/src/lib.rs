//! Path counting for the iceberg-avoiding problem.
//!
//! Counts the monotone (right/down) paths from the top-left to the
//! bottom-right cell of a grid without entering any iceberg. Two counters
//! are provided and must agree: an exhaustive enumerator for small grids
//! and a dynamic-programming counter for grids of any size.

pub mod dyn_prog;
pub mod error;
pub mod exhaustive;
pub mod experiment;
pub mod grid;
pub mod path;

// Re-export main types
pub use dyn_prog::CountTable;
pub use error::{CountError, GridError};
pub use experiment::{run_experiment, ExperimentConfig, ExperimentError, ExperimentSample};
pub use grid::{CellKind, Grid, Position};
pub use path::{Path, StepDirection};
