//! Exhaustive path counter.
//!
//! Every corner-to-corner monotone path has exactly `rows + columns - 2`
//! steps, so a path is fully described by a bit pattern of that length.
//! The counter enumerates all `2^steps` patterns and replays each one
//! against a fresh [`Path`].
//!
//! Bit mapping: bit `k` (least significant first) gives the direction of
//! step `k`. A set bit is [`StepDirection::Right`], a clear bit is
//! [`StepDirection::Down`].

use log::{debug, trace};

use crate::error::CountError;
use crate::grid::Grid;
use crate::path::{Path, StepDirection};

/// Longest path the 64-bit pattern counter can enumerate
pub const MAX_ENUMERABLE_STEPS: usize = 63;

/// Check that `grid` is small enough to enumerate
pub fn check_enumerable(grid: &Grid) -> Result<usize, CountError> {
    let steps = grid.path_length();
    if steps > MAX_ENUMERABLE_STEPS {
        return Err(CountError::PathTooLong { steps });
    }
    Ok(steps)
}

fn direction_for_bit(pattern: u64, k: usize) -> StepDirection {
    if (pattern >> k) & 1 == 1 {
        StepDirection::Right
    } else {
        StepDirection::Down
    }
}

/// Replay `pattern` from the origin.
///
/// Returns `None` as soon as any step would leave the grid or enter an
/// iceberg; the rest of the pattern is not considered.
fn replay<'g>(grid: &'g Grid, pattern: u64, steps: usize) -> Option<Path<'g>> {
    let mut candidate = Path::new(grid);
    for k in 0..steps {
        let direction = direction_for_bit(pattern, k);
        if !candidate.is_step_valid(direction) {
            return None;
        }
        candidate.add_step(direction);
    }
    Some(candidate)
}

/// Call `visit` for every valid path, in pattern order
fn for_each_path<'g, F>(grid: &'g Grid, mut visit: F) -> Result<(), CountError>
where
    F: FnMut(Path<'g>),
{
    let steps = check_enumerable(grid)?;

    // An iceberg on the origin means no path can start.
    if !grid.is_open(0, 0) {
        return Ok(());
    }

    let patterns: u64 = 1u64 << steps;
    let mut rejected: u64 = 0;
    for pattern in 0..patterns {
        match replay(grid, pattern, steps) {
            Some(path) => visit(path),
            None => rejected += 1,
        }
    }
    trace!("rejected {} of {} patterns", rejected, patterns);
    Ok(())
}

/// Count iceberg-avoiding paths by exhaustive enumeration.
///
/// Fails when the path length is 64 steps or more.
pub fn try_count_paths(grid: &Grid) -> Result<u64, CountError> {
    let mut count: u64 = 0;
    for_each_path(grid, |_| count += 1)?;
    debug!(
        "exhaustive count for {}x{} grid: {}",
        grid.rows(),
        grid.columns(),
        count
    );
    Ok(count)
}

/// Count iceberg-avoiding paths by exhaustive enumeration.
///
/// Panics when `rows + columns - 2 >= 64`; callers with large grids should
/// use [`check_enumerable`] or [`try_count_paths`] first.
pub fn count_paths(grid: &Grid) -> u64 {
    try_count_paths(grid).unwrap_or_else(|e| panic!("{}", e))
}

/// List every iceberg-avoiding path, in pattern order
pub fn enumerate_paths(grid: &Grid) -> Result<Vec<Path<'_>>, CountError> {
    let mut paths = Vec::new();
    for_each_path(grid, |path| paths.push(path))?;
    Ok(paths)
}
