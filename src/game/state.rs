use super::food::Food;
use super::geometry::Cell;
use super::snake::Snake;

/// Where the game loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing started yet
    #[default]
    Idle,
    Running,
    Paused,
    /// The snake hit itself; only a restart leaves this phase
    GameOver,
}

/// Complete state of a round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub steps: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a running round carrying over `high_score`
    pub fn new(snake: Snake, food: Food, high_score: u32) -> Self {
        Self {
            snake,
            food,
            score: 0,
            high_score,
            steps: 0,
            phase: Phase::Running,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase != Phase::GameOver
    }
}

/// Read-only copy of what a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Snake segments, head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub grid_size: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    pub fn columns(&self) -> i32 {
        self.canvas_width / self.grid_size
    }

    pub fn rows(&self) -> i32 {
        self.canvas_height / self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn sample_state() -> GameState {
        GameState::new(
            Snake::new(Cell::new(50, 50), Direction::Right, 4, 10, 200, 200),
            Food::at(Cell::new(100, 100), 200, 200, 10),
            7,
        )
    }

    #[test]
    fn test_new_round() {
        let state = sample_state();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 7);
        assert_eq!(state.phase, Phase::Running);
        assert!(state.is_alive());
    }

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
