//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts drive it through [`GameLoop`] and draw from its [`Snapshot`]s.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod food;
pub mod game_loop;
pub mod geometry;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::{GameError, Result};
pub use events::GameEvent;
pub use food::Food;
pub use game_loop::GameLoop;
pub use geometry::Cell;
pub use snake::Snake;
pub use state::{GameState, Phase, Snapshot};
