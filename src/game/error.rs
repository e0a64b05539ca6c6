/// Errors raised by the game core.
///
/// Wall contact and self-collision are ordinary state transitions and never show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Settings rejected at round start
    InvalidConfig(String),
    /// Food could not be placed because the snake covers every cell
    NoFreeCell,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::NoFreeCell => write!(f, "No free cell left for food"),
        }
    }
}

impl std::error::Error for GameError {}

pub type Result<T> = std::result::Result<T, GameError>;
