use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use crossterm::style::Color;
use anyhow::Context;

use crate::config::{BACKGROUND_COLOR, COLUMNS_PER_CELL};
use crate::error::Result;
use crate::game::Canvas;
use crate::TermInt;

/// Draws the game into the terminal, one grid cell per `COLUMNS_PER_CELL`
/// columns of a row, and reads keys from it.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    cell_size: u32,
    stdout: Stdout,
    // frame being drawn
    screen: Vec<Color>,
    // frame on the terminal, None until first drawn
    shown: Vec<Option<Color>>,
}

impl TermManager {
    pub fn new(cell_size: u32) -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager::with_size(width, height, cell_size))
    }

    fn with_size(width: TermInt, height: TermInt, cell_size: u32) -> Self {
        let len = width as usize * height as usize;
        TermManager {
            width,
            height,
            cell_size,
            stdout: stdout(),
            screen: vec![BACKGROUND_COLOR; len],
            shown: vec![None; len],
        }
    }

    /// Collects the key events that arrive before `timeout` runs out, returning
    /// as soon as at least one was read.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            // Drain whatever else is already queued without blocking
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Index range of the terminal cells covered by a pixel rectangle, or None
    /// when it lies off screen.
    fn to_char_rect(&self, x: u32, y: u32, w: u32, h: u32) -> Option<(TermInt, TermInt, TermInt, TermInt)> {
        let cs = self.cell_size;
        let cols = COLUMNS_PER_CELL as u32;

        let x0 = x / cs * cols;
        let y0 = y / cs;
        let x1 = ((x + w + cs - 1) / cs * cols).min(self.width as u32);
        let y1 = ((y + h + cs - 1) / cs).min(self.height as u32);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as TermInt, y0 as TermInt, x1 as TermInt, y1 as TermInt))
    }

    fn index(&self, x: TermInt, y: TermInt) -> usize {
        self.width as usize * y as usize + x as usize
    }
}

/// A terminal mode that has to be undone once entered.
pub trait Session {
    fn setup(&mut self) -> Result<()>;
    fn restore(&mut self) -> Result<()>;
}

impl Session for TermManager {
    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }
}

/// Runs `body` inside the session. `restore` runs once `setup` was attempted,
/// even when `setup` or `body` failed; the first error is the one returned.
pub fn in_session<S, T, F>(session: &mut S, body: F) -> anyhow::Result<T>
where
    S: Session,
    F: FnOnce(&mut S) -> anyhow::Result<T>,
{
    let res = session.setup().context("preparing terminal").and_then(|_| body(session));
    let restored = session.restore().context("restoring terminal");

    match (res, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(e), _) | (Ok(_), Err(e)) => Err(e),
    }
}

impl Canvas for TermManager {
    fn size(&self) -> (u32, u32) {
        let cells_wide = (self.width / COLUMNS_PER_CELL) as u32;
        (cells_wide * self.cell_size, self.height as u32 * self.cell_size)
    }

    fn clear(&mut self) -> Result<()> {
        for c in self.screen.iter_mut() {
            *c = BACKGROUND_COLOR;
        }
        Ok(())
    }

    fn fill_rect(&mut self, color: Color, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        if let Some((x0, y0, x1, y1)) = self.to_char_rect(x, y, width, height) {
            for cy in y0..y1 {
                for cx in x0..x1 {
                    let i = self.index(cx, cy);
                    self.screen[i] = color;
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.index(x, y);
                let color = self.screen[i];
                if self.shown[i] == Some(color) {
                    continue;
                }
                queue!(self.stdout, cursor::MoveTo(x, y), style::SetBackgroundColor(color), style::Print(' '))?;
                self.shown[i] = Some(color);
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_in_pixels() {
        let term = TermManager::with_size(61, 20, 10);
        assert_eq!(term.size(), (300, 200));
    }

    #[test]
    fn test_fill_cell_covers_two_columns() {
        let mut term = TermManager::with_size(10, 4, 10);
        term.fill_rect(Color::Green, 20, 10, 10, 10).unwrap();

        let green: Vec<usize> = (0..term.screen.len()).filter(|i| term.screen[*i] == Color::Green).collect();
        assert_eq!(green, vec![term.index(4, 1), term.index(5, 1)]);
    }

    #[test]
    fn test_fill_off_screen_is_clipped() {
        let mut term = TermManager::with_size(10, 4, 10);
        term.fill_rect(Color::Red, 1000, 1000, 10, 10).unwrap();
        term.fill_rect(Color::Red, 40, 30, 100, 100).unwrap();

        assert_eq!(term.screen.iter().filter(|c| **c == Color::Red).count(), 2);
        assert_eq!(term.screen[term.index(8, 3)], Color::Red);
        assert_eq!(term.screen[term.index(9, 3)], Color::Red);
    }

    #[derive(Default)]
    struct FakeSession {
        fail_setup: bool,
        restored: bool,
        ran: bool,
    }

    impl Session for FakeSession {
        fn setup(&mut self) -> Result<()> {
            if self.fail_setup {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "no tty").into());
            }
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            self.restored = true;
            Ok(())
        }
    }

    #[test]
    fn test_session_restored_after_failed_setup() {
        let mut session = FakeSession { fail_setup: true, ..FakeSession::default() };
        let res = in_session(&mut session, |s| {
            s.ran = true;
            Ok(())
        });

        assert!(res.is_err());
        assert!(!session.ran);
        assert!(session.restored);
    }

    #[test]
    fn test_session_restored_after_body_error() {
        let mut session = FakeSession::default();
        let res: anyhow::Result<()> = in_session(&mut session, |_| Err(anyhow::anyhow!("boom")));

        assert_eq!(res.unwrap_err().to_string(), "boom");
        assert!(session.restored);
    }

    #[test]
    fn test_session_returns_body_value() {
        let mut session = FakeSession::default();
        assert_eq!(in_session(&mut session, |_| Ok(7)).unwrap(), 7);
        assert!(session.restored);
    }

    #[test]
    fn test_clear_resets_frame() {
        let mut term = TermManager::with_size(10, 4, 10);
        term.fill_rect(Color::Green, 0, 0, 50, 40).unwrap();
        term.clear().unwrap();

        assert!(term.screen.iter().all(|c| *c == BACKGROUND_COLOR));
    }
}
