mod config;
mod error;
mod food;
mod game;
mod grid;
mod snake;
mod term;

use std::{fs::File, sync::Mutex, time::{Duration, Instant}};

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{Config, LOG_ENV_VAR, LOG_FILE};
use game::{Input, SnakeGame, map_key};
use snake::MoveResult;
use term::TermManager;

pub type TermInt = u16;
pub type Cell = (i32, i32);

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::default();
    let mut term = TermManager::new(config.cell_size).context("reading terminal size")?;

    term::in_session(&mut term, |term| run(term, config))
}

fn run(term: &mut TermManager, config: Config) -> anyhow::Result<()> {
    let mut game = SnakeGame::new(term, config).context("starting game")?;
    let grid = game.grid();
    info!(cols = grid.max_x(), rows = grid.max_y(), ?config, "game started");

    let period = Duration::from_millis(config.tick_interval_ms);
    let mut next_tick = Instant::now();

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());

        // Input only changes the pending direction; the tick reads it
        let keys = game.canvas().read_key_events(wait)?;
        for key_ev in keys {
            match map_key(&key_ev) {
                Some(Input::Turn(dir)) => game.turn(dir),
                Some(Input::Quit) => {
                    info!("quit");
                    return Ok(());
                },
                None => {}
            }
        }

        if Instant::now() < next_tick {
            continue;
        }

        match game.tick()? {
            MoveResult::Ate { new_head } => {
                let length = game.snake().body().len();
                debug!(?new_head, length, food = ?game.food().cell, "food eaten");
            },
            MoveResult::Respawned { crashed_at } => info!(?crashed_at, "respawned"),
            MoveResult::Moved { .. } => {}
        }
        next_tick = next_deadline(next_tick, period, Instant::now());
    }
}

/// Next tick time. After a stall the schedule restarts from `now` rather
/// than firing the missed ticks back to back.
fn next_deadline(scheduled: Instant, period: Duration, now: Instant) -> Instant {
    (scheduled + period).max(now)
}

/// Logs go to a file since the game owns the terminal; nothing is set up
/// unless the filter variable is present.
fn init_logging() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => return Ok(()),
    };

    let file = File::create(LOG_FILE).with_context(|| format!("creating {}", LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_deadline_on_schedule() {
        let start = Instant::now();
        let period = Duration::from_millis(60);

        assert_eq!(next_deadline(start, period, start + Duration::from_millis(5)), start + period);
    }

    #[test]
    fn test_next_deadline_after_stall() {
        let start = Instant::now();
        let period = Duration::from_millis(60);
        let late = start + Duration::from_millis(500);

        let next = next_deadline(start, period, late);
        assert_eq!(next, late);
        // Only one catch-up tick, then back to the normal period
        assert_eq!(next_deadline(next, period, late), late + period);
    }
}
