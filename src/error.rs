use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal too small: a {cols}x{rows} grid cannot hold a snake of {needed} cells")]
    TerminalTooSmall { cols: i32, rows: i32, needed: i32 },
}

pub type Result<T> = std::result::Result<T, SnakeError>;
