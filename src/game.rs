use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, GameConfig};
use crate::food::place_food;
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Fresh board, waiting for the first start.
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete state of one simulation.
///
/// Every transition consumes the state and returns its successor; invalid
/// transitions hand the state back untouched. The random source lives inside
/// the state so food placement stays reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Position,
    score: u32,
    speed_ms: u64,
    tick_count: u64,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle state with an entropy-seeded random source.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::from_entropy()))
    }

    /// Creates a deterministic idle state for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let center = i32::from(config.grid_size / 2);
        let snake = Snake::new(Position::new(center, center), Direction::Right);
        let food = place_food(&mut rng, config.grid_size, &snake);

        Self {
            snake,
            food,
            score: 0,
            speed_ms: config.initial_speed_ms,
            tick_count: 0,
            status: GameStatus::Idle,
            death_reason: None,
            config,
            rng,
        }
    }

    /// Begins a new game from the idle or game-over screen.
    #[must_use]
    pub fn start(self) -> Self {
        if !matches!(self.status, GameStatus::Idle | GameStatus::GameOver) {
            return self;
        }

        let mut next = Self::with_rng(self.config, self.rng);
        next.status = GameStatus::Playing;
        info!(
            "game started on a {0}x{0} board",
            next.config.grid_size
        );
        next
    }

    /// Queues a turn for the next tick. Ignored unless playing or when it
    /// would reverse the snake onto its own neck.
    #[must_use]
    pub fn request_direction(mut self, direction: Direction) -> Self {
        if self.status == GameStatus::Playing {
            let _ = self.snake.request_direction(direction);
        }
        self
    }

    /// Flips between playing and paused; any other status is kept.
    #[must_use]
    pub fn toggle_pause(mut self) -> Self {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => other,
        };
        self
    }

    /// Advances the simulation by one gameplay tick.
    #[must_use]
    pub fn tick(mut self) -> Self {
        if self.status != GameStatus::Playing {
            return self;
        }

        let next_head = self.snake.turn_and_peek();

        if !next_head.is_within_bounds(self.config.grid_size) {
            return self.end(DeathReason::WallCollision);
        }

        let eats = next_head == self.food;
        if self.snake.would_collide(next_head, eats) {
            return self.end(DeathReason::SelfCollision);
        }

        self.snake.advance(next_head, eats);
        self.tick_count += 1;

        if eats {
            self.score = self.score.saturating_add(self.config.score_increment);
            self.speed_ms = self
                .speed_ms
                .saturating_sub(self.config.speed_decrement_ms)
                .max(self.config.min_speed_ms);
            self.food = place_food(&mut self.rng, self.config.grid_size, &self.snake);
            debug!(
                "food eaten: score {}, length {}, speed {} ms",
                self.score,
                self.snake.len(),
                self.speed_ms
            );
        }

        self
    }

    /// Applies one external input event.
    #[must_use]
    pub fn apply_input(self, input: GameInput) -> Self {
        match input {
            GameInput::Direction(direction) => self.request_direction(direction),
            GameInput::Pause => self.toggle_pause(),
            GameInput::Confirm => self.start(),
            GameInput::Quit => self,
        }
    }

    /// Replaces the snake and food, for scripted scenarios and replays.
    ///
    /// A snake reaching outside the board is refused and the state is handed
    /// back unchanged. Food on the snake or off the board is moved to a free
    /// cell.
    #[must_use]
    pub fn arrange(mut self, snake: Snake, food: Position) -> Self {
        let grid_size = self.config.grid_size;
        if !snake.segments().all(|segment| segment.is_within_bounds(grid_size)) {
            warn!("refusing to arrange a snake outside the {grid_size}x{grid_size} board");
            return self;
        }

        self.food = if snake.occupies(food) || !food.is_within_bounds(grid_size) {
            place_food(&mut self.rng, self.config.grid_size, &snake)
        } else {
            food
        };
        self.snake = snake;
        self
    }

    fn end(mut self, reason: DeathReason) -> Self {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        info!(
            "game over ({reason:?}) with score {} after {} ticks",
            self.score, self.tick_count
        );
        self
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current tick period in milliseconds.
    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Current tick period, for configuring the tick source.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }

    /// Number of ticks that moved the snake in the current game.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Returns the score to hand to the high-score store once the game is over.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        (self.status == GameStatus::GameOver).then_some(self.score)
    }

    #[must_use]
    pub fn grid_size(&self) -> u16 {
        self.config.grid_size
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, GameConfig};
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameState, GameStatus};

    fn config(grid_size: u16) -> GameConfig {
        GameConfig {
            grid_size,
            ..GameConfig::default()
        }
    }

    fn idle(grid_size: u16, seed: u64) -> GameState {
        GameState::new_with_seed(config(grid_size), seed).expect("test config should be valid")
    }

    fn playing(grid_size: u16, seed: u64) -> GameState {
        idle(grid_size, seed).start()
    }

    #[test]
    fn new_state_is_idle_at_center() {
        let state = idle(20, 1);

        assert_eq!(state.status(), GameStatus::Idle);
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.snake().head(), Position::new(10, 10));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert_eq!(state.speed_ms(), 150);
        assert!(!state.snake().occupies(state.food()));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = playing(10, 1).arrange(
            Snake::new(Position::new(1, 1), Direction::Right),
            Position::new(3, 1),
        );

        state = state.tick();
        assert_eq!(state.snake().len(), 1);

        state = state.tick();
        assert_eq!(
            state.snake().segments().copied().collect::<Vec<_>>(),
            vec![Position::new(3, 1), Position::new(2, 1)]
        );
    }

    #[test]
    fn eating_food_scores_and_speeds_up() {
        let state = playing(20, 4)
            .arrange(
                Snake::new(Position::new(10, 10), Direction::Right),
                Position::new(11, 10),
            )
            .tick();

        assert_eq!(state.snake().segments().copied().collect::<Vec<_>>(), vec![
            Position::new(11, 10),
            Position::new(10, 10)
        ]);
        assert_eq!(state.score(), 10);
        assert_eq!(state.speed_ms(), 148);
        assert_ne!(state.food(), Position::new(11, 10));
        assert!(!state.snake().occupies(state.food()));
    }

    #[test]
    fn wall_collision_sets_game_over_without_moving() {
        let before = playing(4, 2).arrange(
            Snake::new(Position::new(3, 1), Direction::Right),
            Position::new(0, 0),
        );
        let food = before.food();

        let after = before.tick();

        assert_eq!(after.status(), GameStatus::GameOver);
        assert_eq!(after.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(after.snake().head(), Position::new(3, 1));
        assert_eq!(after.food(), food);
        assert_eq!(after.score(), 0);
        assert_eq!(after.final_score(), Some(0));
    }

    #[test]
    fn self_collision_sets_game_over() {
        // Heading up into a segment that is not the tail.
        let segments = vec![
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
            Position::new(3, 1),
            Position::new(2, 1),
            Position::new(1, 1),
        ];
        let state = playing(6, 3)
            .arrange(
                Snake::from_segments(segments.clone(), Direction::Up)
                    .expect("coiled body should be valid"),
                Position::new(5, 5),
            )
            .tick();

        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(
            state.snake().segments().copied().collect::<Vec<_>>(),
            segments
        );
    }

    #[test]
    fn head_may_follow_the_vacating_tail() {
        // Tight 2x2 loop: moving up puts the head where the tail is leaving.
        let state = playing(6, 5)
            .arrange(
                Snake::from_segments(
                    vec![
                        Position::new(1, 1),
                        Position::new(2, 1),
                        Position::new(2, 0),
                        Position::new(1, 0),
                    ],
                    Direction::Left,
                )
                .expect("2x2 loop should be valid"),
                Position::new(5, 5),
            )
            .request_direction(Direction::Up)
            .tick();

        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.snake().head(), Position::new(1, 0));
        assert_eq!(state.snake().len(), 4);
    }

    #[test]
    fn reversal_request_is_ignored() {
        let state = playing(20, 6)
            .arrange(
                Snake::new(Position::new(5, 5), Direction::Right),
                Position::new(0, 0),
            )
            .request_direction(Direction::Left);

        assert_eq!(state.pending_direction(), Direction::Right);

        let state = state.tick();
        assert_eq!(state.snake().head(), Position::new(6, 5));
    }

    #[test]
    fn direction_requests_outside_play_are_ignored() {
        let state = idle(20, 7).request_direction(Direction::Up);

        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn tick_is_a_no_op_unless_playing() {
        let idle = idle(20, 8);
        let head = idle.snake().head();
        let idle = idle.tick();
        assert_eq!(idle.status(), GameStatus::Idle);
        assert_eq!(idle.snake().head(), head);

        let paused = playing(20, 8).toggle_pause();
        let food = paused.food();
        let paused = paused.tick().tick();
        assert_eq!(paused.status(), GameStatus::Paused);
        assert_eq!(paused.snake().head(), head);
        assert_eq!(paused.food(), food);
        assert_eq!(paused.tick_count(), 0);
    }

    #[test]
    fn pause_toggles_only_between_playing_and_paused() {
        let idle = idle(20, 9).toggle_pause();
        assert_eq!(idle.status(), GameStatus::Idle);

        let state = idle.start().toggle_pause();
        assert_eq!(state.status(), GameStatus::Paused);

        let state = state.toggle_pause();
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn start_is_ignored_while_playing() {
        let state = playing(20, 10).tick();
        let head = state.snake().head();

        let state = state.start();
        assert_eq!(state.tick_count(), 1);
        assert_eq!(state.snake().head(), head);
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let state = playing(20, 11)
            .arrange(
                Snake::new(Position::new(0, 0), Direction::Up),
                Position::new(5, 5),
            )
            .tick();
        assert_eq!(state.status(), GameStatus::GameOver);

        let state = state.apply_input(GameInput::Confirm);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.snake().head(), Position::new(10, 10));
        assert_eq!(state.score(), 0);
        assert_eq!(state.death_reason(), None);
        assert_eq!(state.final_score(), None);
    }

    #[test]
    fn arranged_food_on_snake_is_relocated() {
        let state = playing(10, 12).arrange(
            Snake::new(Position::new(4, 4), Direction::Right),
            Position::new(4, 4),
        );

        assert_ne!(state.food(), Position::new(4, 4));
    }

    #[test]
    fn direction_requests_while_paused_are_ignored() {
        let state = playing(20, 13)
            .toggle_pause()
            .request_direction(Direction::Up);

        assert_eq!(state.pending_direction(), Direction::Right);

        let state = state.toggle_pause().tick();
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.snake().head(), Position::new(11, 10));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        assert_eq!(
            GameState::new_with_seed(config(1), 14).err(),
            Some(ConfigError::GridTooSmall(1))
        );
        assert_eq!(
            GameState::new(config(0)).err(),
            Some(ConfigError::GridTooSmall(0))
        );
    }

    #[test]
    fn smallest_board_starts_with_food_off_the_snake() {
        let state = idle(2, 15);

        assert_eq!(state.snake().head(), Position::new(1, 1));
        assert!(state.food().is_within_bounds(2));
        assert!(!state.snake().occupies(state.food()));
    }

    #[test]
    fn arranging_a_snake_off_the_board_is_refused() {
        let state = playing(5, 16);
        let head = state.snake().head();

        let outside = Snake::from_segments(
            vec![Position::new(4, 2), Position::new(5, 2)],
            Direction::Left,
        )
        .expect("body shape is valid");
        let state = state.arrange(outside, Position::new(0, 0));

        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.snake().head(), head);
    }
}
