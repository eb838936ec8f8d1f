//! Game constants

use crossterm::style::Color;

/// Side of one grid cell in surface pixels
pub const CELL_SIZE: u32 = 10;

/// Game clock period, lower is faster
pub const TICK_INTERVAL_MS: u64 = 60;

/// Starting length; the spawned body has one more segment than this
pub const INITIAL_SNAKE_SIZE: i32 = 5;

/// Terminal columns used to draw one grid cell, so cells look square
pub const COLUMNS_PER_CELL: u16 = 2;

pub const SNAKE_COLOR: Color = Color::Green;
pub const FOOD_COLOR: Color = Color::Red;
pub const BACKGROUND_COLOR: Color = Color::Reset;

/// Environment variable holding the log filter; logging is off when unset
pub const LOG_ENV_VAR: &str = "SNAKE_LOG";

pub const LOG_FILE: &str = "snake.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub cell_size: u32,
    pub tick_interval_ms: u64,
    pub initial_size: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cell_size: CELL_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_size: INITIAL_SNAKE_SIZE,
        }
    }
}
