//! Snake Arcade - wrap-around Snake driven by a fixed-timestep game loop
//!
//! This library provides:
//! - Core game logic and the game loop state machine (game module)
//! - Direction intents and key mapping (input module)
//! - High score persistence (persistence module)
//! - TUI rendering and the interactive terminal mode (render, modes modules)

pub mod game;
pub mod input;
pub mod modes;
pub mod persistence;
pub mod render;
