use crossterm::style::Color;
use rand::{rngs::ThreadRng, Rng};

use crate::config::FOOD_COLOR;
use crate::grid::Grid;
use crate::Cell;

/// The single food item on the board. Replaced, never moved, once eaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub cell: Cell,
    pub color: Color,
}

/// Places food uniformly at random anywhere on the grid. Cells under the
/// snake are not excluded.
pub struct FoodSpawner<R: Rng = ThreadRng> {
    grid: Grid,
    rng: R,
}

impl FoodSpawner {
    pub fn new(grid: Grid) -> Self {
        FoodSpawner::with_rng(grid, rand::thread_rng())
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub fn with_rng(grid: Grid, rng: R) -> Self {
        FoodSpawner { grid, rng }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn spawn(&mut self) -> Food {
        let x = self.rng.gen_range(0..self.grid.max_x());
        let y = self.rng.gen_range(0..self.grid.max_y());

        Food { cell: (x, y), color: FOOD_COLOR }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_spawn_stays_in_bounds() {
        let grid = Grid::new(7, 3);
        let mut spawner = FoodSpawner::with_rng(grid, StdRng::seed_from_u64(42));

        for _ in 0..1000 {
            let food = spawner.spawn();
            assert!(!grid.is_out_of_bounds(food.cell), "{:?} outside grid", food.cell);
            assert_eq!(food.color, FOOD_COLOR);
        }
    }

    #[test]
    fn test_spawn_reaches_every_cell() {
        let grid = Grid::new(4, 2);
        let mut spawner = FoodSpawner::with_rng(grid, StdRng::seed_from_u64(7));
        let mut seen = vec![false; 8];

        for _ in 0..1000 {
            let (x, y) = spawner.spawn().cell;
            seen[(y * 4 + x) as usize] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_single_cell_grid() {
        let mut spawner = FoodSpawner::new(Grid::new(1, 1));
        assert_eq!(spawner.spawn().cell, (0, 0));
    }
}
