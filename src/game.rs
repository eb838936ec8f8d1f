use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use rand::{rngs::ThreadRng, Rng};
use tracing::trace;

use crate::config::{Config, SNAKE_COLOR};
use crate::error::{Result, SnakeError};
use crate::food::{Food, FoodSpawner};
use crate::grid::Grid;
use crate::snake::{Direction::{*, self}, MoveResult, Snake};
use crate::Cell;

/// A pixel surface the game draws on.
pub trait Canvas {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Paints the whole surface with the background color.
    fn clear(&mut self) -> Result<()>;

    fn fill_rect(&mut self, color: Color, x: u32, y: u32, width: u32, height: u32) -> Result<()>;

    /// Shows everything drawn since the last `clear`.
    fn present(&mut self) -> Result<()>;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn fill_rect(&mut self, color: Color, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        (**self).fill_rect(color, x, y, width, height)
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Turn(Direction),
    Quit,
}

pub fn map_key(ev: &KeyEvent) -> Option<Input> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Input::Quit)
        },
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Char('w') | KeyCode::Up => Some(Input::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Input::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Input::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Input::Turn(Right)),
            KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
            _ => None,
        }
    }
}

/// Owns the whole game state and advances it one tick at a time.
pub struct SnakeGame<C: Canvas, R: Rng = ThreadRng> {
    config: Config,
    grid: Grid,
    canvas: C,
    snake: Snake,
    food: Food,
    spawner: FoodSpawner<R>,
}

impl<C: Canvas> SnakeGame<C> {
    pub fn new(canvas: C, config: Config) -> Result<Self> {
        let grid = grid_for(&canvas, &config)?;
        Ok(SnakeGame::with_spawner(canvas, config, FoodSpawner::new(grid)))
    }
}

impl<C: Canvas, R: Rng> SnakeGame<C, R> {
    /// The spawner's grid is the game's grid; `new` checks it against the canvas.
    fn with_spawner(canvas: C, config: Config, mut spawner: FoodSpawner<R>) -> Self {
        let grid = spawner.grid();
        let snake = Snake::new(config.initial_size, grid);
        let food = spawner.spawn();

        SnakeGame { config, grid, canvas, snake, food, spawner }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn turn(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    pub fn tick(&mut self) -> Result<MoveResult> {
        self.canvas.clear()?;

        let res = self.snake.move_step(&self.food);
        if res.ate_food() {
            self.food = self.spawner.spawn();
        }
        trace!(?res, food = ?self.food.cell, "tick");

        let size = self.config.cell_size;
        for pos in self.snake.body() {
            paint_cell(&mut self.canvas, size, SNAKE_COLOR, *pos)?;
        }
        paint_cell(&mut self.canvas, size, self.food.color, self.food.cell)?;

        self.canvas.present()?;
        Ok(res)
    }
}

fn paint_cell<C: Canvas>(canvas: &mut C, size: u32, color: Color, (x, y): Cell) -> Result<()> {
    canvas.fill_rect(color, x as u32 * size, y as u32 * size, size, size)
}

/// Grid for the canvas, refusing surfaces too small for the spawned snake.
fn grid_for<C: Canvas>(canvas: &C, config: &Config) -> Result<Grid> {
    let (w, h) = canvas.size();
    let grid = Grid::from_surface(w, h, config.cell_size);
    let needed = config.initial_size + 1;

    if grid.max_x() < needed || grid.max_y() < 1 {
        return Err(SnakeError::TerminalTooSmall { cols: grid.max_x(), rows: grid.max_y(), needed });
    }
    Ok(grid)
}
