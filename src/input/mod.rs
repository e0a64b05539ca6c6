//! Input translation
//!
//! Device capture produces [`KeyAction`]s; direction intents then wait in an
//! [`IntentQueue`] until the game loop's next tick.

pub mod handler;
pub mod queue;

pub use handler::{InputHandler, KeyAction};
pub use queue::IntentQueue;
