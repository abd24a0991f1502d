//! Grid representation shared by both counters.
//!
//! A grid is an immutable row-major arrangement of open cells and icebergs.
//! The text format uses one line per row, `.` for open water and `X` for an
//! iceberg. The JSON format wraps the same row strings: `{"rows": [".X", ".."]}`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Open,
    Iceberg,
}

impl CellKind {
    pub fn from_char(c: char) -> Option<CellKind> {
        match c {
            '.' => Some(CellKind::Open),
            'X' => Some(CellKind::Iceberg),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            CellKind::Open => '.',
            CellKind::Iceberg => 'X',
        }
    }
}

/// Position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Number of cells in a `rows x columns` grid, if it can be allocated
fn cell_count(rows: usize, columns: usize) -> Result<usize, GridError> {
    rows.checked_mul(columns)
        .filter(|&count| count <= isize::MAX as usize)
        .ok_or(GridError::TooLarge { rows, columns })
}

/// JSON shape of a grid
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridRows {
    rows: Vec<String>,
}

/// Immutable, non-empty grid of open cells and icebergs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRows", into = "GridRows")]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Row-major cells, exactly `rows * columns` long
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create a grid from row-major cells
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<CellKind>) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }
        let expected = cell_count(rows, columns)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Create a grid with no icebergs
    pub fn open(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }
        let count = cell_count(rows, columns)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|_| GridError::TooLarge { rows, columns })?;
        cells.resize(count, CellKind::Open);
        Self::from_cells(rows, columns, cells)
    }

    /// Create a grid with icebergs at the given positions
    pub fn with_icebergs(
        rows: usize,
        columns: usize,
        icebergs: &[Position],
    ) -> Result<Self, GridError> {
        let mut grid = Self::open(rows, columns)?;
        for &pos in icebergs {
            if pos.row >= rows || pos.column >= columns {
                return Err(GridError::OutOfBounds {
                    row: pos.row,
                    column: pos.column,
                });
            }
            let index = grid.index(pos.row, pos.column);
            grid.cells[index] = CellKind::Iceberg;
        }
        Ok(grid)
    }

    /// Create a grid where every cell is an iceberg with probability `density`.
    ///
    /// The origin and destination are always left open.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity(density));
        }
        let mut grid = Self::open(rows, columns)?;
        for cell in grid.cells.iter_mut() {
            if rng.gen_bool(density) {
                *cell = CellKind::Iceberg;
            }
        }
        let last = grid.cells.len() - 1;
        grid.cells[0] = CellKind::Open;
        grid.cells[last] = CellKind::Open;
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Cell at (row, column). Panics when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> CellKind {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({}, {}) is outside a {}x{} grid",
            row,
            column,
            self.rows,
            self.columns
        );
        self.cells[self.index(row, column)]
    }

    /// Whether (row, column) is inside the grid and not an iceberg
    pub fn is_open(&self, row: usize, column: usize) -> bool {
        row < self.rows
            && column < self.columns
            && self.cells[self.index(row, column)] == CellKind::Open
    }

    /// Number of steps in any corner-to-corner monotone path
    pub fn path_length(&self) -> usize {
        self.rows + self.columns - 2
    }

    pub fn origin(&self) -> Position {
        Position::new(0, 0)
    }

    pub fn destination(&self) -> Position {
        Position::new(self.rows - 1, self.columns - 1)
    }

    pub fn iceberg_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellKind::Iceberg)
            .count()
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    fn row_string(&self, row: usize) -> String {
        let start = row * self.columns;
        self.cells[start..start + self.columns]
            .iter()
            .map(|c| c.to_char())
            .collect()
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let columns = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows * columns);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != columns {
                return Err(GridError::RaggedRow {
                    row,
                    expected: columns,
                    found: width,
                });
            }
            for (column, c) in line.chars().enumerate() {
                let cell = CellKind::from_char(c)
                    .ok_or(GridError::UnknownCell { row, column, found: c })?;
                cells.push(cell);
            }
        }

        Self::from_cells(rows, columns, cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_string(row))?;
        }
        Ok(())
    }
}

impl TryFrom<GridRows> for Grid {
    type Error = GridError;

    fn try_from(value: GridRows) -> Result<Self, Self::Error> {
        value.rows.join("\n").parse()
    }
}

impl From<Grid> for GridRows {
    fn from(grid: Grid) -> Self {
        GridRows {
            rows: (0..grid.rows).map(|row| grid.row_string(row)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_text_format() {
        let grid: Grid = "..X\n...\n".parse().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(0, 2), CellKind::Iceberg);
        assert_eq!(grid.get(1, 2), CellKind::Open);
        assert_eq!(grid.iceberg_count(), 1);
        assert_eq!(grid.path_length(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!("\n  \n".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(
            "...\n..\n".parse::<Grid>(),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            ".#\n".parse::<Grid>(),
            Err(GridError::UnknownCell {
                row: 0,
                column: 1,
                found: '#'
            })
        );
    }

    #[test]
    fn test_display_matches_text_format() {
        let text = ".X.\n...\nX..\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(Grid::open(0, 3), Err(GridError::Empty));
        assert_eq!(Grid::open(3, 0), Err(GridError::Empty));
        assert_eq!(
            Grid::from_cells(2, 2, vec![CellKind::Open; 3]),
            Err(GridError::CellCountMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert_eq!(
            Grid::open(usize::MAX, 2),
            Err(GridError::TooLarge {
                rows: usize::MAX,
                columns: 2
            })
        );
        assert_eq!(
            Grid::from_cells(usize::MAX, usize::MAX, Vec::new()),
            Err(GridError::TooLarge {
                rows: usize::MAX,
                columns: usize::MAX
            })
        );

        // Fits in a usize but not in memory
        assert_eq!(
            Grid::open(1 << 31, 1 << 31),
            Err(GridError::TooLarge {
                rows: 1 << 31,
                columns: 1 << 31
            })
        );

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Grid::random(usize::MAX / 2, 4, 0.5, &mut rng),
            Err(GridError::TooLarge {
                rows: usize::MAX / 2,
                columns: 4
            })
        );
    }

    #[test]
    fn test_with_icebergs() {
        let grid = Grid::with_icebergs(2, 2, &[Position::new(0, 1)]).unwrap();
        assert!(grid.is_open(0, 0));
        assert!(!grid.is_open(0, 1));
        assert!(!grid.is_open(2, 0));
        assert_eq!(
            Grid::with_icebergs(2, 2, &[Position::new(2, 0)]),
            Err(GridError::OutOfBounds { row: 2, column: 0 })
        );
    }

    #[test]
    fn test_random_keeps_corners_open() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(5, 4, 1.0, &mut rng).unwrap();
        assert!(grid.is_open(0, 0));
        assert!(grid.is_open(4, 3));
        assert_eq!(grid.iceberg_count(), 18);

        assert_eq!(
            Grid::random(2, 2, 1.5, &mut rng),
            Err(GridError::InvalidDensity(1.5))
        );
    }

    #[test]
    fn test_json_format() {
        let grid: Grid = serde_json::from_str(r#"{"rows": [".X", ".."]}"#).unwrap();
        assert_eq!(grid.get(0, 1), CellKind::Iceberg);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"rows":[".X",".."]}"#);

        assert!(serde_json::from_str::<Grid>(r#"{"rows": []}"#).is_err());
    }
}
