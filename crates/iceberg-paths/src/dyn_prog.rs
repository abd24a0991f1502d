//! Dynamic-programming path counter.
//!
//! Fills a table holding, for every cell, the number of iceberg-avoiding
//! paths from the origin to that cell. Runs in O(rows * columns).

use log::debug;

use crate::error::CountError;
use crate::grid::{CellKind, Grid};

/// Per-cell path counts, sized exactly to the grid.
///
/// A cell whose count does not fit in a `u64` holds `None`. Only the cells
/// it feeds inherit the overflow, so unreachable blow-ups never affect the
/// destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    rows: usize,
    columns: usize,
    /// Row-major counts
    counts: Vec<Option<u64>>,
}

impl CountTable {
    fn zeroed(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            counts: vec![Some(0); rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of paths from the origin to (row, column), `None` on overflow
    pub fn get(&self, row: usize, column: usize) -> Option<u64> {
        self.counts[row * self.columns + column]
    }

    /// Number of paths reaching the bottom-right cell, `None` on overflow
    pub fn destination_count(&self) -> Option<u64> {
        self.get(self.rows - 1, self.columns - 1)
    }

    fn set(&mut self, row: usize, column: usize, count: Option<u64>) {
        self.counts[row * self.columns + column] = count;
    }
}

/// Build the count table for `grid`
pub fn count_table(grid: &Grid) -> CountTable {
    let (rows, columns) = (grid.rows(), grid.columns());
    let mut table = CountTable::zeroed(rows, columns);

    if grid.get(0, 0) == CellKind::Open {
        table.set(0, 0, Some(1));
    }

    for i in 0..rows {
        for j in 0..columns {
            if i == 0 && j == 0 {
                continue;
            }
            if grid.get(i, j) == CellKind::Iceberg {
                continue;
            }

            let mut count = Some(0u64);
            if i > 0 && grid.is_open(i - 1, j) {
                count = table.get(i - 1, j);
            }
            if j > 0 && grid.is_open(i, j - 1) {
                count = count
                    .zip(table.get(i, j - 1))
                    .and_then(|(above, left)| above.checked_add(left));
            }
            table.set(i, j, count);
        }
    }

    table
}

/// Count iceberg-avoiding paths with the dynamic-programming table.
///
/// Fails only when the destination count overflows a `u64`.
pub fn try_count_paths(grid: &Grid) -> Result<u64, CountError> {
    let destination = grid.destination();
    let count = count_table(grid)
        .destination_count()
        .ok_or(CountError::Overflow {
            row: destination.row,
            column: destination.column,
        })?;
    debug!(
        "dyn-prog count for {}x{} grid: {}",
        grid.rows(),
        grid.columns(),
        count
    );
    Ok(count)
}

/// Count iceberg-avoiding paths with the dynamic-programming table.
///
/// Panics when the count overflows a `u64`.
pub fn count_paths(grid: &Grid) -> u64 {
    try_count_paths(grid).unwrap_or_else(|e| panic!("{}", e))
}
