//! Error types for grid construction and path counting.

use std::fmt;

/// Reasons a grid could not be constructed
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Zero rows or zero columns
    Empty,
    /// `rows * columns` cells cannot be addressed in memory
    TooLarge { rows: usize, columns: usize },
    /// A row of the text format has a different width than the first row
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.` or `X` in the text format
    UnknownCell { row: usize, column: usize, found: char },
    /// The cell vector does not hold exactly `rows * columns` cells
    CellCountMismatch { expected: usize, found: usize },
    /// An iceberg coordinate lies outside the grid
    OutOfBounds { row: usize, column: usize },
    /// Iceberg density must be a probability
    InvalidDensity(f64),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid must have at least one row and one column"),
            GridError::TooLarge { rows, columns } => {
                write!(f, "a {}x{} grid is too large to allocate", rows, columns)
            }
            GridError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            GridError::UnknownCell { row, column, found } => write!(
                f,
                "unknown cell {:?} at ({}, {}), expected '.' or 'X'",
                found, row, column
            ),
            GridError::CellCountMismatch { expected, found } => {
                write!(f, "expected {} cells, found {}", expected, found)
            }
            GridError::OutOfBounds { row, column } => {
                write!(f, "cell ({}, {}) is outside the grid", row, column)
            }
            GridError::InvalidDensity(density) => {
                write!(f, "iceberg density {} is not within [0, 1]", density)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Reasons a counter refused to produce a count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountError {
    /// Path length does not fit the 64-bit enumeration counter
    PathTooLong { steps: usize },
    /// A cell's path count exceeds `u64::MAX`
    Overflow { row: usize, column: usize },
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountError::PathTooLong { steps } => write!(
                f,
                "path length {} is too long to enumerate, must be below 64",
                steps
            ),
            CountError::Overflow { row, column } => write!(
                f,
                "path count at ({}, {}) overflows a 64-bit counter",
                row, column
            ),
        }
    }
}

impl std::error::Error for CountError {}
