use std::collections::VecDeque;

use crate::game::Direction;

/// How many direction changes may wait for upcoming ticks
pub const MAX_PENDING_INTENTS: usize = 2;

/// Direction intents recorded between ticks.
///
/// The game loop takes at most one per tick, so two quick key presses turn
/// the snake on two consecutive ticks instead of the second one overwriting the
/// first.
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    pending: VecDeque<Direction>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direction change. Repeats of the last queued direction and
    /// presses beyond [`MAX_PENDING_INTENTS`] are dropped.
    pub fn push(&mut self, direction: Direction) -> bool {
        if self.pending.len() >= MAX_PENDING_INTENTS || self.pending.back() == Some(&direction) {
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    /// Take the next direction for the coming tick
    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
