use std::collections::VecDeque;

use super::action::Direction;
use super::food::Food;
use super::geometry::Cell;

/// The snake in the game
///
/// Growth is deferred: eating only raises `max_cells`, and the body catches up
/// over the following moves because the tail stops being trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    cells: VecDeque<Cell>,
    /// Target length the body grows towards
    max_cells: usize,
    /// Current heading
    direction: Direction,
    /// Distance covered by one move
    grid_size: i32,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`.
    ///
    /// Segments that would fall off the field are wrapped onto the opposite
    /// edge of a `width` x `height` canvas.
    pub fn new(
        head: Cell,
        direction: Direction,
        length: usize,
        grid_size: i32,
        width: i32,
        height: i32,
    ) -> Self {
        let (dx, dy) = direction.velocity(grid_size);
        let mut cells = VecDeque::with_capacity(length);
        cells.push_back(head);

        for i in 1..length {
            let prev = cells[i - 1];
            let segment = prev.moved_by(-dx, -dy);
            cells.push_back(Cell::new(
                segment.x.rem_euclid(width),
                segment.y.rem_euclid(height),
            ));
        }

        Self {
            cells,
            max_cells: length,
            direction,
            grid_size,
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    /// All segments, head first
    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.cells
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current velocity in canvas units per move
    pub fn velocity(&self) -> (i32, i32) {
        self.direction.velocity(self.grid_size)
    }

    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Steer towards `direction`.
    ///
    /// Turns along the current axis are refused, which rules out reversing
    /// straight into the neck. Returns whether the heading changed.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_same_axis(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance one cell: prepend the new head and trim the tail to `max_cells`.
    ///
    /// No bounds handling here, see [`Snake::check_wall_collision`].
    pub fn move_forward(&mut self) {
        let (dx, dy) = self.velocity();
        let new_head = self.head().moved_by(dx, dy);
        self.cells.push_front(new_head);

        while self.cells.len() > self.max_cells {
            self.cells.pop_back();
        }
    }

    /// Wrap the head back onto the field if it just left it.
    pub fn check_wall_collision(&mut self, width: i32, height: i32, grid_size: i32) {
        if let Some(head) = self.cells.front_mut() {
            *head = head.wrapped(width, height, grid_size);
        }
    }

    /// True if the head sits exactly on the food
    pub fn eat_food(&self, food: &Food) -> bool {
        self.head() == food.position()
    }

    pub fn grow(&mut self) {
        self.max_cells += 1;
    }

    /// True if the head overlaps any other segment
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.cells.iter().skip(1).any(|&cell| cell == head)
    }

    /// Check if a cell is covered by any segment, head included
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
