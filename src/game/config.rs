use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::{GameError, Result};
use super::geometry::Cell;

/// Settings for a round.
///
/// Read once when a round starts; a running round never sees later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one grid cell in canvas units
    pub grid_size: i32,
    /// Width of the play field in canvas units
    pub canvas_width: i32,
    /// Height of the play field in canvas units
    pub canvas_height: i32,
    /// Milliseconds between two fixed updates
    pub tick_ms: u64,
    /// Length of the snake when a round starts
    pub initial_snake_length: usize,
    /// Starting head position as (column, row)
    pub start_cell: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            canvas_width: 400,
            canvas_height: 400,
            tick_ms: 100,
            initial_snake_length: 4,
            start_cell: (5, 5),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid and canvas
    pub fn new(grid_size: i32, canvas_width: i32, canvas_height: i32) -> Self {
        Self {
            grid_size,
            canvas_width,
            canvas_height,
            ..Default::default()
        }
    }

    /// Small 20x20 board with 10-unit cells
    pub fn small() -> Self {
        Self::new(10, 200, 200)
    }

    /// Load settings from a JSON file; missing fields fall back to defaults
    pub fn from_json_file(path: &Path) -> AnyResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse settings {:?}", path))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Number of grid columns
    pub fn columns(&self) -> i32 {
        self.canvas_width / self.grid_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.canvas_height / self.grid_size
    }

    /// Head cell of a freshly spawned snake
    pub fn start_position(&self) -> Cell {
        Cell::from_grid(self.start_cell.0, self.start_cell.1, self.grid_size)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(invalid(format!(
                "grid size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.canvas_width <= 0 || self.canvas_height <= 0 {
            return Err(invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.canvas_width % self.grid_size != 0 || self.canvas_height % self.grid_size != 0 {
            return Err(invalid(format!(
                "canvas {}x{} is not a multiple of grid size {}",
                self.canvas_width, self.canvas_height, self.grid_size
            )));
        }
        if self.tick_ms == 0 {
            return Err(invalid("tick interval must be at least 1 ms".to_string()));
        }
        if self.initial_snake_length < 2 {
            return Err(invalid(format!(
                "initial snake length must be at least 2, got {}",
                self.initial_snake_length
            )));
        }
        if self.initial_snake_length as i64 >= self.columns() as i64 {
            return Err(invalid(format!(
                "initial snake length {} does not fit in {} columns",
                self.initial_snake_length,
                self.columns()
            )));
        }

        let (col, row) = self.start_cell;
        if col < 0 || col >= self.columns() || row < 0 || row >= self.rows() {
            return Err(invalid(format!(
                "start cell ({}, {}) is outside the {}x{} grid",
                col,
                row,
                self.columns(),
                self.rows()
            )));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> GameError {
    GameError::InvalidConfig(msg)
}
