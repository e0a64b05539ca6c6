//! Fixed-timestep game loop.
//!
//! The host calls [`GameLoop::frame`] once per rendered frame. Real time is
//! collected in an accumulator and spent in whole ticks, so a slow frame runs
//! several updates and a fast one may run none. Rendering goes through
//! [`GameLoop::snapshot`], which never touches the game state.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    engine::GameEngine,
    error::{GameError, Result},
    events::GameEvent,
    state::{GameState, Phase, Snapshot},
};
use crate::input::IntentQueue;
use crate::persistence::HighScoreStore;

/// Most ticks a single frame may owe; older time is dropped
pub const MAX_CATCH_UP_TICKS: u32 = 8;

pub struct GameLoop {
    engine: GameEngine,
    state: GameState,
    /// Settings waiting for the next round
    pending_config: Option<GameConfig>,
    intents: IntentQueue,
    accumulator: Duration,
    last_frame: Option<Instant>,
    store: Box<dyn HighScoreStore>,
    events: Vec<GameEvent>,
}

impl GameLoop {
    /// Create an idle loop. The high score is read from `store` right away.
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Result<Self> {
        Self::from_engine(GameEngine::new(config)?, store)
    }

    /// Idle loop with a reproducible food sequence
    pub fn with_seed(
        config: GameConfig,
        store: Box<dyn HighScoreStore>,
        seed: u64,
    ) -> Result<Self> {
        Self::from_engine(GameEngine::with_seed(config, seed)?, store)
    }

    fn from_engine(mut engine: GameEngine, store: Box<dyn HighScoreStore>) -> Result<Self> {
        let high_score = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to load high score, starting from 0");
            0
        });

        let mut state = engine.reset(high_score)?;
        state.phase = Phase::Idle;

        Ok(Self {
            engine,
            state,
            pending_config: None,
            intents: IntentQueue::new(),
            accumulator: Duration::ZERO,
            last_frame: None,
            store,
            events: Vec::new(),
        })
    }

    /// Begin a fresh round from any phase, picking up staged settings
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if let Some(config) = self.pending_config.take() {
            self.engine.set_config(config)?;
        }

        self.state = self.engine.reset(self.state.high_score)?;
        self.intents.clear();
        self.accumulator = Duration::ZERO;
        self.last_frame = Some(now);
        self.events.push(GameEvent::RoundStarted);

        let config = self.engine.config();
        debug!(
            columns = config.columns(),
            rows = config.rows(),
            tick_ms = config.tick_ms,
            high_score = self.state.high_score,
            "Round started"
        );

        Ok(())
    }

    /// Stage settings for the next [`GameLoop::start`]. The current round is unaffected.
    pub fn apply_settings(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.pending_config = Some(config);
        Ok(())
    }

    /// Record a direction change for an upcoming tick
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        match self.state.phase {
            Phase::Running | Phase::Paused => self.intents.push(direction),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Pause a running round or resume a paused one
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(now),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Suspend updates. The accumulator keeps whatever partial tick it held.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        self.state.phase = Phase::Paused;
        self.events.push(GameEvent::Paused);
        true
    }

    /// Continue a paused round. Time spent paused is not replayed.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.state.phase = Phase::Running;
        self.last_frame = Some(now);
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Per-frame callback: run every tick that is due and return how many ran
    pub fn frame(&mut self, now: Instant) -> Result<u32> {
        if self.state.phase != Phase::Running {
            return Ok(0);
        }

        let interval = self.engine.config().tick_interval();
        let last = self.last_frame.replace(now).unwrap_or(now);
        self.accumulator += now.saturating_duration_since(last);
        self.accumulator = self.accumulator.min(interval * MAX_CATCH_UP_TICKS);

        let mut ticks = 0;
        while self.accumulator >= interval && self.state.phase == Phase::Running {
            self.accumulator -= interval;
            self.update()?;
            ticks += 1;
        }

        Ok(ticks)
    }

    /// One fixed update: steer, move, wrap, eat, then check for self-collision
    pub fn update(&mut self) -> Result<()> {
        if self.state.phase != Phase::Running {
            return Ok(());
        }

        let action = Action::from(self.intents.pop());
        let result = match self.engine.step(&mut self.state, action) {
            Ok(result) => result,
            Err(err) => {
                self.end_round();
                return Err(err);
            }
        };

        if let Some(position) = result.info.eaten_at {
            self.events.push(GameEvent::FoodEaten {
                position,
                score: self.state.score,
            });
        }

        if result.info.new_high_score {
            self.persist_high_score();
            self.events.push(GameEvent::HighScore {
                score: self.state.high_score,
            });
        }

        if result.terminated {
            self.end_round();
        }

        if result.info.board_full {
            return Err(GameError::NoFreeCell);
        }

        Ok(())
    }

    fn end_round(&mut self) {
        self.state.phase = Phase::GameOver;
        self.intents.clear();

        info!(
            score = self.state.score,
            high_score = self.state.high_score,
            steps = self.state.steps,
            "Game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.state.score,
            high_score: self.state.high_score,
        });
    }

    fn persist_high_score(&mut self) {
        if let Err(err) = self.store.save(self.state.high_score) {
            warn!(error = %err, high_score = self.state.high_score, "Failed to save high score");
        }
    }

    /// Owned copy of everything a renderer draws
    pub fn snapshot(&self) -> Snapshot {
        let config = self.engine.config();

        Snapshot {
            snake: self.state.snake.cells().iter().copied().collect(),
            food: self.state.food.position(),
            score: self.state.score,
            high_score: self.state.high_score,
            phase: self.state.phase,
            grid_size: config.grid_size,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
        }
    }

    /// Hand out events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    /// Settings of the current round
    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }
}
