//! Cross-checks between the exhaustive and dynamic-programming counters.

use iceberg_paths::{dyn_prog, exhaustive, CellKind, Grid, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn binomial(n: u64, k: u64) -> u64 {
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

fn with_cell(grid: &Grid, target: Position, kind: CellKind) -> Grid {
    let mut cells = Vec::with_capacity(grid.rows() * grid.columns());
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            if Position::new(row, column) == target {
                cells.push(kind);
            } else {
                cells.push(grid.get(row, column));
            }
        }
    }
    Grid::from_cells(grid.rows(), grid.columns(), cells).unwrap()
}

#[test]
fn open_grids_count_binomial_coefficients() {
    for rows in 1..=7 {
        for columns in 1..=7 {
            let grid = Grid::open(rows, columns).unwrap();
            let expected = binomial((rows + columns - 2) as u64, (rows - 1) as u64);
            assert_eq!(exhaustive::count_paths(&grid), expected, "{}x{}", rows, columns);
            assert_eq!(dyn_prog::count_paths(&grid), expected, "{}x{}", rows, columns);
        }
    }
}

#[test]
fn random_grids_agree() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..300 {
        let rows = rng.gen_range(1..=7);
        let columns = rng.gen_range(1..=7);
        let density = rng.gen_range(0.0..0.5);
        let grid = Grid::random(rows, columns, density, &mut rng).unwrap();
        assert_eq!(
            exhaustive::count_paths(&grid),
            dyn_prog::count_paths(&grid),
            "grid:\n{}",
            grid
        );
    }
}

#[test]
fn blocked_corners_yield_zero() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let rows = rng.gen_range(1..=6);
        let columns = rng.gen_range(1..=6);
        let grid = Grid::random(rows, columns, 0.3, &mut rng).unwrap();

        let origin_blocked = with_cell(&grid, grid.origin(), CellKind::Iceberg);
        assert_eq!(exhaustive::count_paths(&origin_blocked), 0);
        assert_eq!(dyn_prog::count_paths(&origin_blocked), 0);

        let destination_blocked = with_cell(&grid, grid.destination(), CellKind::Iceberg);
        assert_eq!(exhaustive::count_paths(&destination_blocked), 0);
        assert_eq!(dyn_prog::count_paths(&destination_blocked), 0);
    }
}

#[test]
fn fully_blocked_line_yields_zero() {
    for n in 2..=6 {
        for line in 0..n {
            let row: Vec<Position> = (0..n).map(|c| Position::new(line, c)).collect();
            let grid = Grid::with_icebergs(n, n, &row).unwrap();
            assert_eq!(exhaustive::count_paths(&grid), 0);
            assert_eq!(dyn_prog::count_paths(&grid), 0);

            let column: Vec<Position> = (0..n).map(|r| Position::new(r, line)).collect();
            let grid = Grid::with_icebergs(n, n, &column).unwrap();
            assert_eq!(exhaustive::count_paths(&grid), 0);
            assert_eq!(dyn_prog::count_paths(&grid), 0);
        }
    }
}

#[test]
fn enumerated_paths_match_count() {
    let grid: Grid = "....\n.X..\n...X\n....\n".parse().unwrap();
    let paths = exhaustive::enumerate_paths(&grid).unwrap();
    assert_eq!(paths.len() as u64, dyn_prog::count_paths(&grid));

    let mut rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    rendered.sort();
    rendered.dedup();
    assert_eq!(rendered.len(), paths.len());
}
