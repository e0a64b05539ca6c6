//! Events emitted by the game loop.
//!
//! Audio, UI and logging collaborators react to these instead of being called
//! from inside the update step.

use super::geometry::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh round began
    RoundStarted,
    /// The snake ate the food at `position`
    FoodEaten { position: Cell, score: u32 },
    /// The score passed the previous high score
    HighScore { score: u32 },
    Paused,
    Resumed,
    /// The snake ran into itself; the round is over
    GameOver { score: u32, high_score: u32 },
}
