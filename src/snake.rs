use std::collections::VecDeque;

use tracing::debug;

use crate::food::Food;
use crate::grid::Grid;
use crate::Cell;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell },
    /// The head landed on the food; the caller owes a fresh one.
    Ate { new_head: Cell },
    /// Hit a wall or the body at `crashed_at`, and the snake was reset.
    Respawned { crashed_at: Cell },
}

impl MoveResult {
    pub fn ate_food(&self) -> bool {
        matches!(self, Ate { .. })
    }

    pub fn respawned(&self) -> bool {
        matches!(self, Respawned { .. })
    }
}

pub struct Snake {
    size: i32,
    grid: Grid,
    // head first
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Builds a snake of `size + 1` segments and spawns it.
    pub fn new(size: i32, grid: Grid) -> Self {
        let mut snake = Snake {
            size,
            grid,
            body: VecDeque::with_capacity(size as usize + 1),
            direction: Right,
        };
        snake.spawn();
        snake
    }

    /// Lays the body out along the top row, head at `x = size`, moving right.
    pub fn spawn(&mut self) {
        self.body.clear();
        self.body.extend((0..=self.size).rev().map(|x| (x, 0)));
        self.direction = Right;
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        // spawn() always leaves at least one segment
        self.body[0]
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Requests a turn for the next move. Reversals are dropped silently; the
    /// last accepted request before a move wins.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction.is_opposite(self.direction) {
            debug!(?new_direction, current = ?self.direction, "ignoring reversal");
            return;
        }
        self.direction = new_direction;
    }

    pub fn move_step(&mut self, food: &Food) -> MoveResult {
        let (hx, hy) = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (hx + dx, hy + dy);

        // The tail leaves its cell in the same step, so it is not an obstacle
        self.body.pop_back();

        if self.grid.is_out_of_bounds(new_head) || self.body.contains(&new_head) {
            debug!(?new_head, length = self.body.len() + 1, "crashed");
            self.spawn();
            return Respawned { crashed_at: new_head };
        }

        self.body.push_front(new_head);

        if new_head == food.cell {
            self.body.push_back(food.cell);
            Ate { new_head }
        } else {
            Moved { new_head }
        }
    }
}
