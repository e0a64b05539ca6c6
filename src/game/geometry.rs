/// A grid-aligned cell on the canvas.
///
/// Coordinates are in canvas units, so every component is a multiple of the
/// configured grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell at grid column/row `(col, row)`
    pub fn from_grid(col: i32, row: i32, grid_size: i32) -> Self {
        Self::new(col * grid_size, row * grid_size)
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Re-enter the field from the opposite edge after stepping past one.
    ///
    /// Only handles a single step out of bounds; in-bounds cells are returned unchanged.
    pub fn wrapped(&self, width: i32, height: i32, grid_size: i32) -> Self {
        if self.is_in_bounds(width, height) {
            return *self;
        }

        let x = if self.x < 0 {
            width - grid_size
        } else if self.x >= width {
            0
        } else {
            self.x
        };
        let y = if self.y < 0 {
            height - grid_size
        } else if self.y >= height {
            0
        } else {
            self.y
        };

        Self { x, y }
    }

    pub fn is_in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// Every cell of a `width` x `height` canvas, row by row
pub fn all_cells(width: i32, height: i32, grid_size: i32) -> impl Iterator<Item = Cell> {
    let columns = width / grid_size;
    let rows = height / grid_size;

    (0..rows).flat_map(move |row| (0..columns).map(move |col| Cell::from_grid(col, row, grid_size)))
}
