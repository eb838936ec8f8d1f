use crate::Cell;

/// Playfield size in cells, fixed once the drawing surface is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    max_x: i32,
    max_y: i32,
}

impl Grid {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Grid { max_x, max_y }
    }

    /// Derives the grid from surface pixels. Any remainder that does not fill
    /// a whole cell is unreachable.
    pub fn from_surface(width_px: u32, height_px: u32, cell_size: u32) -> Self {
        Grid::new((width_px / cell_size) as i32, (height_px / cell_size) as i32)
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn is_out_of_bounds(&self, (x, y): Cell) -> bool {
        x < 0 || x >= self.max_x || y < 0 || y >= self.max_y
    }
}
