use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::VecDeque;

use super::error::{GameError, Result};
use super::geometry::{Cell, all_cells};

/// Random draws tried before falling back to enumerating the free cells
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// A piece of food together with the field it is sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
    canvas_width: i32,
    canvas_height: i32,
    grid_size: i32,
}

impl Food {
    /// Food at a fixed cell
    pub fn at(position: Cell, canvas_width: i32, canvas_height: i32, grid_size: i32) -> Self {
        Self {
            position,
            canvas_width,
            canvas_height,
            grid_size,
        }
    }

    /// Place food anywhere on the field not covered by `occupied`
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        canvas_width: i32,
        canvas_height: i32,
        grid_size: i32,
        occupied: &VecDeque<Cell>,
    ) -> Result<Self> {
        let position = sample_free_cell(rng, canvas_width, canvas_height, grid_size, occupied)?;
        Ok(Self::at(position, canvas_width, canvas_height, grid_size))
    }

    /// New food on the same field, away from `snake_cells`
    pub fn respawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        snake_cells: &VecDeque<Cell>,
    ) -> Result<Self> {
        Self::spawn(
            rng,
            self.canvas_width,
            self.canvas_height,
            self.grid_size,
            snake_cells,
        )
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}

/// Uniformly pick a grid-aligned cell outside `occupied`.
///
/// Rejection sampling first; once that keeps hitting the snake, choose among
/// the remaining free cells directly. Fails only when none are left.
fn sample_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    grid_size: i32,
    occupied: &VecDeque<Cell>,
) -> Result<Cell> {
    let columns = width / grid_size;
    let rows = height / grid_size;

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = Cell::from_grid(
            rng.gen_range(0..columns),
            rng.gen_range(0..rows),
            grid_size,
        );
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    all_cells(width, height, grid_size)
        .filter(|cell| !occupied.contains(cell))
        .choose(rng)
        .ok_or(GameError::NoFreeCell)
}
