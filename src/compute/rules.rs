//! Generational transition function (B3/S23).

use rayon::prelude::*;

use super::{Grid, GridError};

/// Next state of a single cell under the standard Game of Life rule.
///
/// - Alive with 2 or 3 alive neighbours: survives
/// - Dead with exactly 3 alive neighbours: born
/// - Anything else: dead
#[inline]
pub fn next_cell_state(alive: bool, alive_neighbors: u8) -> bool {
    matches!((alive, alive_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Compute generation N+1 from generation N.
///
/// The result is written into a freshly allocated grid and `current` is only
/// read, so the transition is a pure function of its input. Rows are
/// evaluated in parallel; each one only reads generation N.
pub fn step(current: &Grid) -> Result<Grid, GridError> {
    let mut next = Grid::new(current.rows(), current.cols())?;
    let cols = current.cols();

    next.cells_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                let alive = current.is_alive(row, col);
                *cell = next_cell_state(alive, current.alive_neighbors(row, col));
            }
        });

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(r, c) in alive {
            grid.set(r, c, true).unwrap();
        }
        grid
    }

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        grid.cells()
            .filter(|&(_, _, alive)| alive)
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8u8 {
            assert_eq!(next_cell_state(true, n), n == 2 || n == 3, "alive, n={}", n);
            assert_eq!(next_cell_state(false, n), n == 3, "dead, n={}", n);
        }
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let next = step(&block).unwrap();
        assert_eq!(next, block);
        assert_eq!(step(&next).unwrap(), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = step(&horizontal).unwrap();
        assert_eq!(alive_cells(&vertical), vec![(1, 2), (2, 2), (3, 2)]);

        let back = step(&vertical).unwrap();
        assert_eq!(back, horizontal);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(step(&grid).unwrap().population(), 0);
    }

    #[test]
    fn test_overcrowded_cell_dies() {
        // Center has 4 alive neighbours.
        let grid = grid_with(3, 3, &[(1, 1), (0, 0), (0, 2), (2, 0), (2, 2)]);
        let next = step(&grid).unwrap();
        assert!(!next.get(1, 1).unwrap());
    }

    #[test]
    fn test_corner_block_does_not_wrap() {
        // A block in the top-left corner stays a block; nothing appears on the
        // opposite edges because there is no wraparound.
        let grid = grid_with(5, 5, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let next = step(&grid).unwrap();
        assert_eq!(next, grid);
    }

    #[test]
    fn test_blinker_against_top_edge() {
        let grid = grid_with(4, 4, &[(0, 1), (1, 1), (2, 1)]);
        let next = step(&grid).unwrap();
        assert_eq!(alive_cells(&next), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_glider_moves_diagonally() {
        let glider = grid_with(10, 10, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut grid = glider.clone();
        for _ in 0..4 {
            grid = step(&grid).unwrap();
        }
        assert_eq!(
            alive_cells(&grid),
            vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn test_step_preserves_dimensions() {
        let grid = Grid::new(3, 17).unwrap();
        let next = step(&grid).unwrap();
        assert_eq!((next.rows(), next.cols()), (3, 17));
    }

    proptest! {
        #[test]
        fn prop_step_is_pure(rows in 1usize..16, cols in 1usize..16, bits in prop::collection::vec(any::<bool>(), 256)) {
            let mut grid = Grid::new(rows, cols).unwrap();
            for row in 0..rows {
                for col in 0..cols {
                    grid.set(row, col, bits[row * 16 + col]).unwrap();
                }
            }
            let copy = grid.clone();

            let a = step(&grid).unwrap();
            let b = step(&copy).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&grid, &copy);
        }
    }
}
