//! Monotone paths and step validation.

use std::fmt;

use smallvec::SmallVec;

use crate::grid::{Grid, Position};

/// Direction of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    Right,
    Down,
}

impl StepDirection {
    /// Letter used when printing a path
    pub fn to_char(self) -> char {
        match self {
            StepDirection::Right => 'R',
            StepDirection::Down => 'D',
        }
    }

    /// Position reached by taking this step from `from`
    pub fn apply(self, from: Position) -> Position {
        match self {
            StepDirection::Right => Position::new(from.row, from.column + 1),
            StepDirection::Down => Position::new(from.row + 1, from.column),
        }
    }
}

/// A path starting at the origin of a grid.
///
/// Every step in the path is valid: it stays within the grid and never
/// enters an iceberg.
#[derive(Debug, Clone)]
pub struct Path<'g> {
    grid: &'g Grid,
    /// Enumerable paths are shorter than 64 steps, so these stay inline
    steps: SmallVec<[StepDirection; 64]>,
    position: Position,
}

impl<'g> Path<'g> {
    /// Create an empty path at the origin of `grid`
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            steps: SmallVec::new(),
            position: grid.origin(),
        }
    }

    /// Check whether taking a step in `direction` stays on open water
    pub fn is_step_valid(&self, direction: StepDirection) -> bool {
        let next = direction.apply(self.position);
        self.grid.is_open(next.row, next.column)
    }

    /// Take a step. Panics if the step is invalid.
    pub fn add_step(&mut self, direction: StepDirection) {
        assert!(
            self.is_step_valid(direction),
            "step {:?} from ({}, {}) leaves open water",
            direction,
            self.position.row,
            self.position.column
        );
        self.position = direction.apply(self.position);
        self.steps.push(direction);
    }

    pub fn final_position(&self) -> Position {
        self.position
    }

    pub fn steps(&self) -> &[StepDirection] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the path ends at the bottom-right cell
    pub fn reaches_destination(&self) -> bool {
        self.position == self.grid.destination()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.to_char())?;
        }
        Ok(())
    }
}
