use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::{GameError, Result},
    food::Food,
    geometry::Cell,
    snake::Snake,
    state::{GameState, Phase},
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Cell the food was eaten at
    pub eaten_at: Option<Cell>,
    /// Whether this step raised the high score
    pub new_high_score: bool,
    /// Whether the head ran into the body
    pub self_collision: bool,
    /// Whether the snake covers the whole board, leaving nowhere for new food
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the round has ended
    pub terminated: bool,
    pub info: StepInfo,
}

/// Applies the per-tick rules to a [`GameState`]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine after checking `config`
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swap the settings used by the next [`GameEngine::reset`]
    pub fn set_config(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Start a new round, keeping `high_score`
    pub fn reset(&mut self, high_score: u32) -> Result<GameState> {
        let config = &self.config;
        let snake = Snake::new(
            config.start_position(),
            Direction::Right,
            config.initial_snake_length,
            config.grid_size,
            config.canvas_width,
            config.canvas_height,
        );

        let food = Food::spawn(
            &mut self.rng,
            config.canvas_width,
            config.canvas_height,
            config.grid_size,
            snake.cells(),
        )?;

        Ok(GameState::new(snake, food, high_score))
    }

    /// Execute one tick: steer, move, wrap, eat, then test for self-collision
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<StepResult> {
        if !state.is_alive() {
            return Ok(StepResult {
                terminated: true,
                info: StepInfo::default(),
            });
        }

        if let Action::Move(direction) = action {
            state.snake.turn(direction);
        }

        let config = &self.config;
        state.snake.move_forward();
        state
            .snake
            .check_wall_collision(config.canvas_width, config.canvas_height, config.grid_size);
        state.steps += 1;

        let mut info = StepInfo::default();

        if state.snake.eat_food(&state.food) {
            info.ate_food = true;
            info.eaten_at = Some(state.food.position());

            state.snake.grow();
            state.score += 1;
            if state.score > state.high_score {
                state.high_score = state.score;
                info.new_high_score = true;
            }

            match state.food.respawn(&mut self.rng, state.snake.cells()) {
                Ok(food) => state.food = food,
                Err(GameError::NoFreeCell) => {
                    info.board_full = true;
                    state.phase = Phase::GameOver;
                }
                Err(err) => return Err(err),
            }
        }

        if state.snake.check_self_collision() {
            info.self_collision = true;
            state.phase = Phase::GameOver;
        }

        Ok(StepResult {
            terminated: !state.is_alive(),
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::small(), 11).unwrap()
    }

    #[test]
    fn test_reset() {
        let mut engine = small_engine();
        let state = engine.reset(3).unwrap();

        assert!(state.is_alive());
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 3);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Cell::new(50, 50));
        assert!(!state.snake.contains(state.food.position()));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(GameEngine::new(GameConfig::new(0, 200, 200)).is_err());
        assert!(GameEngine::new(GameConfig::new(10, 200, 205)).is_err());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = small_engine();
        let mut state = engine.reset(0).unwrap();
        state.food = Food::at(Cell::new(150, 150), 200, 200, 10);

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), Cell::new(60, 50));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_wraps_at_wall() {
        let mut engine = small_engine();
        let mut state = GameState::new(
            Snake::new(Cell::new(190, 50), Direction::Right, 4, 10, 200, 200),
            Food::at(Cell::new(100, 100), 200, 200, 10),
            0,
        );

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Cell::new(0, 50));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = small_engine();
        let mut state = engine.reset(0).unwrap();
        state.food = Food::at(Cell::new(60, 50), 200, 200, 10);

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(result.info.ate_food);
        assert_eq!(result.info.eaten_at, Some(Cell::new(60, 50)));
        assert!(result.info.new_high_score);
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
        assert_eq!(state.snake.max_cells(), 5);
        // Growth shows up on the next move
        assert_eq!(state.snake.len(), 4);
        assert!(!state.snake.contains(state.food.position()));

        engine.step(&mut state, Action::Continue).unwrap();
        assert_eq!(state.snake.len(), 5);
    }

    #[test]
    fn test_high_score_not_lowered() {
        let mut engine = small_engine();
        let mut state = engine.reset(10).unwrap();
        state.food = Food::at(Cell::new(60, 50), 200, 200, 10);

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(!result.info.new_high_score);
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = small_engine();

        // Body: (50,50) (40,50) (30,50) (20,50) (10,50)
        let snake = Snake::new(Cell::new(50, 50), Direction::Right, 5, 10, 200, 200);
        let mut state = GameState::new(snake, Food::at(Cell::new(150, 150), 200, 200, 10), 0);

        engine.step(&mut state, Action::Move(Direction::Down)).unwrap();
        engine.step(&mut state, Action::Move(Direction::Left)).unwrap();
        let result = engine.step(&mut state, Action::Move(Direction::Up)).unwrap();

        assert!(result.terminated);
        assert!(result.info.self_collision);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = small_engine();
        let mut state = engine.reset(0).unwrap();
        state.food = Food::at(Cell::new(150, 150), 200, 200, 10);

        engine.step(&mut state, Action::Move(Direction::Left)).unwrap();

        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.head(), Cell::new(60, 50));
        assert!(state.is_alive());
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = small_engine();
        let mut state = engine.reset(0).unwrap();
        state.phase = Phase::GameOver;
        let head_before = state.snake.head();

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(result.terminated);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.head(), head_before);
    }

    #[test]
    fn test_score_monotonic_over_long_run() {
        let mut engine = small_engine();
        let mut state = engine.reset(0).unwrap();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        let mut last_score = 0;

        for i in 0..400 {
            let action = if i % 13 == 0 {
                Action::Move(turns[(i / 13) % turns.len()])
            } else {
                Action::Continue
            };
            let result = engine.step(&mut state, action).unwrap();

            assert!(state.score >= last_score);
            assert!(state.snake.len() <= state.snake.max_cells());
            assert!(!state.snake.contains(state.food.position()) || result.terminated);
            last_score = state.score;

            if result.terminated {
                break;
            }
        }
    }

    #[test]
    fn test_set_config_validates() {
        let mut engine = small_engine();
        assert!(engine.set_config(GameConfig::new(7, 200, 200)).is_err());
        assert_eq!(engine.config(), &GameConfig::small());

        engine.set_config(GameConfig::default()).unwrap();
        let state = engine.reset(0).unwrap();
        assert_eq!(state.snake.head(), Cell::new(100, 100));
    }

    #[test]
    fn test_full_board_ends_round_after_scoring() {
        // One row of four cells with a three-cell snake
        let config = GameConfig {
            grid_size: 10,
            canvas_width: 40,
            canvas_height: 10,
            initial_snake_length: 3,
            start_cell: (2, 0),
            ..GameConfig::default()
        };
        let mut engine = GameEngine::with_seed(config, 2).unwrap();
        let mut state = engine.reset(0).unwrap();

        let first = engine.step(&mut state, Action::Continue).unwrap();
        assert!(first.info.ate_food);
        assert!(!first.info.board_full);

        let last = engine.step(&mut state, Action::Continue).unwrap();
        assert!(last.terminated);
        assert!(last.info.board_full);
        assert!(last.info.new_high_score);
        assert_eq!(last.info.eaten_at, Some(Cell::new(0, 0)));
        assert_eq!(state.score, 2);
        assert_eq!(state.high_score, 2);
        assert_eq!(state.phase, Phase::GameOver);
    }
}
