use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    board::{Board, GameOverReason, MoveOutcome},
    config::GameConfig,
    object::{CheckerBoard, ObjectId},
    snake::Snake,
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// What the move did
    pub outcome: MoveOutcome,
    /// Whether the game has terminated
    pub terminated: bool,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    snake: ObjectId,
    /// Set once the game ends; later steps report it again
    game_over: Option<GameOverReason>,
    steps: u32,
    seed: Option<u64>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::build(config, None)
    }

    /// Engine whose fruit placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::build(config, Some(seed))
    }

    fn build(config: GameConfig, seed: Option<u64>) -> Self {
        let (board, snake) = Self::setup(&config, seed);
        Self {
            config,
            board,
            snake,
            game_over: None,
            steps: 0,
            seed,
        }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) {
        let (board, snake) = Self::setup(&self.config, self.seed);
        self.board = board;
        self.snake = snake;
        self.game_over = None;
        self.steps = 0;
    }

    /// Background first, then the snake, then the fruits
    fn setup(config: &GameConfig, seed: Option<u64>) -> (Board, ObjectId) {
        let (width, height) = (config.grid_width, config.grid_height);
        let mut board = match seed {
            Some(seed) => Board::with_seed(width, height, seed),
            None => Board::new(width, height),
        };

        board.add(CheckerBoard::new(width, height, config.checker_colors));

        let head = ((height / 2) as i32, (width / 2) as i32);
        let snake = board.add(Snake::straight(
            head,
            Direction::Right,
            config.initial_snake_length,
            config.snake_head_color,
            config.snake_body_color,
        ));

        for _ in 0..config.fruit_count {
            board.create_fruit(config.fruit_color);
        }

        info!(width, height, fruits = config.fruit_count, "new game");
        (board, snake)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.board.snake(self.snake)
    }

    pub fn is_alive(&self) -> bool {
        self.game_over.is_none()
    }

    /// Why the game ended, if it has
    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Segments gained since the start
    pub fn score(&self) -> u32 {
        self.snake()
            .map(|snake| snake.len().saturating_sub(self.config.initial_snake_length) as u32)
            .unwrap_or(0)
    }

    /// Execute one step of the game. Once the game is over the board is left
    /// alone and the reason it ended is reported again.
    pub fn step(&mut self, action: Action) -> StepResult {
        if let Some(reason) = self.game_over {
            return StepResult {
                outcome: MoveOutcome::GameOver(reason),
                terminated: true,
            };
        }

        if let Action::Move(direction) = action {
            let forbid_reversal = self.config.forbid_reversal;
            if let Some(snake) = self.snake_mut() {
                if forbid_reversal {
                    snake.turn(direction);
                } else {
                    snake.set_direction(direction);
                }
            }
        }

        let outcome = self
            .board
            .move_snake(self.snake)
            .unwrap_or(MoveOutcome::Moved);
        self.steps += 1;

        match outcome {
            MoveOutcome::GameOver(reason) => {
                self.game_over = Some(reason);
                info!(?reason, score = self.score(), steps = self.steps, "game over");
            }
            MoveOutcome::Ate(fruit) => debug!(%fruit, steps = self.steps, "snake ate"),
            MoveOutcome::Moved => {}
        }

        StepResult {
            outcome,
            terminated: !self.is_alive(),
        }
    }

    fn snake_mut(&mut self) -> Option<&mut Snake> {
        self.board.snake_mut(self.snake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::object::Tiled;

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.step(Action::Continue);
        engine.reset();

        assert!(engine.is_alive());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.steps(), 0);
        assert_eq!(engine.snake().unwrap().len(), 3);
    }

    #[test]
    fn test_initial_layout() {
        let engine = GameEngine::with_seed(GameConfig::default(), 2);
        let objects: Vec<_> = engine.board().objects().map(|(_, o)| o).collect();

        assert_eq!(objects.len(), 3);
        assert!(objects[0].is_background());
        let snake = objects[1].as_snake().unwrap();
        assert_eq!(snake.head().map(|t| t.position()), Some((7, 10)));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(objects[2].as_fruit().is_some());
    }

    #[test]
    fn test_multiple_fruits() {
        let mut config = GameConfig::small();
        config.fruit_count = 4;
        let engine = GameEngine::with_seed(config, 3);
        assert_eq!(engine.board().fruits().count(), 4);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 4);
        let initial_head = engine.snake().unwrap().head();

        let result = engine.step(Action::Continue);

        assert!(!result.terminated);
        assert_eq!(engine.steps(), 1);
        assert_ne!(engine.snake().unwrap().head(), initial_head);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 5);
        engine.step(Action::Move(Direction::Up));

        let mut last = None;
        for _ in 0..10 {
            let result = engine.step(Action::Continue);
            if result.terminated {
                last = Some(result);
                break;
            }
        }

        let result = last.expect("snake should hit the top wall");
        assert_eq!(result.outcome, MoveOutcome::GameOver(GameOverReason::Wall));
        assert!(!engine.is_alive());
    }

    #[test]
    fn test_reversal_allowed_by_default() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 6);
        let result = engine.step(Action::Move(Direction::Left));

        assert!(result.terminated);
        assert_eq!(
            result.outcome,
            MoveOutcome::GameOver(GameOverReason::SelfCollision)
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut config = GameConfig::small();
        config.forbid_reversal = true;
        let mut engine = GameEngine::with_seed(config, 7);

        let result = engine.step(Action::Move(Direction::Left));

        assert!(!matches!(result.outcome, MoveOutcome::GameOver(_)));
        assert_eq!(engine.snake().unwrap().direction(), Direction::Right);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 8);
        engine.step(Action::Move(Direction::Left));
        assert!(!engine.is_alive());
        let steps_before = engine.steps();
        let head_before = engine.snake().unwrap().head();

        let result = engine.step(Action::Move(Direction::Up));

        assert!(result.terminated);
        assert_eq!(
            result.outcome,
            MoveOutcome::GameOver(GameOverReason::SelfCollision)
        );
        assert_eq!(engine.steps(), steps_before);
        assert_eq!(engine.snake().unwrap().head(), head_before);
        assert_eq!(engine.snake().unwrap().direction(), Direction::Left);
    }

    #[test]
    fn test_reset_clears_game_over() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 10);
        engine.step(Action::Move(Direction::Left));
        assert_eq!(engine.game_over(), Some(GameOverReason::SelfCollision));

        engine.reset();
        assert_eq!(engine.game_over(), None);
        assert!(!engine.step(Action::Continue).terminated);
    }

    #[test]
    fn test_score_counts_growth() {
        // Head (0,2), body (0,1) and (0,0): the only free cell is (0,3)
        let mut engine = GameEngine::with_seed(GameConfig::new(4, 1), 9);
        let fruit = engine.board().fruits().next().map(|(_, f)| f.tile().position());
        assert_eq!(fruit, Some((0, 3)));

        let result = engine.step(Action::Continue);
        assert!(matches!(result.outcome, MoveOutcome::Ate(_)));
        assert_eq!(engine.score(), 0);
        // The tail cell it just left is the only place for the replacement
        let fruit = engine.board().fruits().next().map(|(_, f)| f.tile().position());
        assert_eq!(fruit, Some((0, 0)));

        let result = engine.step(Action::Continue);
        assert_eq!(result.outcome, MoveOutcome::GameOver(GameOverReason::Wall));
        assert_eq!(engine.score(), 1);
    }
}
