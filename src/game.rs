use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, FOOD_SCORE, INITIAL_SNAKE_LENGTH};
use crate::snake::{Direction, Position, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    GameOver,
}

/// What a single tick did, for incremental redrawing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or game over; nothing changed.
    Idle,
    /// The snake moved one cell; `vacated` is the cell its tail left.
    Moved { vacated: Position },
    /// The snake ate the food and grew; the food has been replaced.
    Ate,
    /// The proposed move hit a wall or the body; now game over.
    Died,
}

/// Whole game state plus the random source for food placement.
///
/// All mutation goes through `set_direction`, `toggle_pause`, `tick` and
/// `reset`; everything else is read-only accessors.
pub struct Game {
    config: Config,
    snake: Snake,
    direction: Direction,
    food: Position,
    score: u32,
    high_score: u32,
    speed: Duration,
    status: Status,
    rng: StdRng,
}

impl Game {
    /// Fails when the config cannot host a playable game; this keeps food
    /// placement's sampling ranges non-empty.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(config, rng))
    }

    fn with_rng(config: Config, mut rng: StdRng) -> Self {
        let snake = Self::initial_snake(&config);
        let food = place_food(&config, &snake, &mut rng);
        Game {
            config,
            snake,
            direction: Direction::Right,
            food,
            score: 0,
            high_score: 0,
            speed: config.initial_speed,
            status: Status::Running,
            rng,
        }
    }

    fn initial_snake(config: &Config) -> Snake {
        let center = Position::new(config.height / 2, config.width / 2);
        Snake::new(center, INITIAL_SNAKE_LENGTH, Direction::Right)
    }

    /// Commits a new heading unless it would reverse the snake into its own
    /// neck, or the game is not running. Rejections are silent.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != Status::Running {
            return;
        }
        if requested == self.direction.opposite() {
            return;
        }
        self.direction = requested;
    }

    /// Flips Running <-> Paused. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            Status::GameOver => Status::GameOver,
        };
    }

    /// Advances the game by one step.
    ///
    /// The proposed head is checked against the walls first and the body
    /// second, before any mutation, so a move that would be both counts as
    /// a wall hit and leaves the snake untouched.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != Status::Running {
            return TickOutcome::Idle;
        }

        let new_head = self.snake.head().step(self.direction);

        if self.hits_wall(new_head) || self.snake.contains(new_head) {
            self.status = Status::GameOver;
            return TickOutcome::Died;
        }

        if new_head == self.food {
            self.snake.advance(new_head, true);
            self.score += FOOD_SCORE;
            self.speed = ramp_speed(self.speed, &self.config);
            self.food = place_food(&self.config, &self.snake, &mut self.rng);
            TickOutcome::Ate
        } else {
            let vacated = self.snake.advance(new_head, false);
            // advance() always vacates a cell when not growing
            TickOutcome::Moved { vacated: vacated.unwrap() }
        }
    }

    /// Starts a fresh game, keeping only the high score.
    pub fn reset(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        self.snake = Self::initial_snake(&self.config);
        self.direction = Direction::Right;
        self.food = place_food(&self.config, &self.snake, &mut self.rng);
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.status = Status::Running;
    }

    fn hits_wall(&self, pos: Position) -> bool {
        let m = self.config.margin;
        pos.row <= m
            || pos.row >= self.config.height - 1 - m
            || pos.col <= m
            || pos.col >= self.config.width - 1 - m
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

fn ramp_speed(current: Duration, config: &Config) -> Duration {
    current
        .checked_sub(config.speed_decrement)
        .map_or(config.speed_floor, |s| s.max(config.speed_floor))
}

/// Uniform rejection sampling over the interior cells, retried until the
/// candidate misses every snake segment. The interior always has more cells
/// than the snake can occupy on a validated board mid-game, so this
/// terminates.
fn place_food(config: &Config, snake: &Snake, rng: &mut StdRng) -> Position {
    loop {
        let candidate = Position::new(
            rng.gen_range(config.interior_min()..=config.interior_max_row()),
            rng.gen_range(config.interior_min()..=config.interior_max_col()),
        );
        if !snake.contains(candidate) {
            return candidate;
        }
    }
}
