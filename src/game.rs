use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::Body;
use crate::config::{GridSize, START_LENGTH, TICK_DECAY_PER_POINT, TICK_MIN, TICK_START};
use crate::error::GameError;
use crate::food::place_food;
use crate::geometry::{add, wrap, Point};
use crate::input::{direction_change_is_valid, Direction, GameInput};
use crate::score::HighScoreStore;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    BoardFilled,
}

/// Tick interval for a given score: shrinks linearly, floored at `TICK_MIN`.
#[must_use]
pub fn calc_tick(score: u32) -> Duration {
    TICK_START
        .saturating_sub(TICK_DECAY_PER_POINT.saturating_mul(score))
        .max(TICK_MIN)
}

/// Complete mutable game state for one session.
#[derive(Debug)]
pub struct GameState<S: HighScoreStore> {
    pub body: Body,
    pub food: Point,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub wrap: bool,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    bounds: GridSize,
    tick_interval: Duration,
    saved_high_score: u32,
    store: S,
    rng: StdRng,
}

impl<S: HighScoreStore> GameState<S> {
    /// Starts a game with an entropy-seeded food generator.
    pub fn new(bounds: GridSize, wrap: bool, store: S) -> Result<Self, GameError> {
        Self::with_rng(bounds, wrap, store, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    pub fn new_with_seed(
        bounds: GridSize,
        wrap: bool,
        store: S,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(bounds, wrap, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        bounds: GridSize,
        wrap: bool,
        mut store: S,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        if !bounds.is_playable() {
            return Err(GameError::GridTooSmall {
                height: bounds.height,
                width: bounds.width,
            });
        }

        let high_score = store.load();
        let body = spawn_body(bounds);
        let food = place_food(&mut rng, bounds, &body);
        info!(
            "new game on {}x{} grid, wrap={wrap}, high score {high_score}",
            bounds.height, bounds.width
        );

        Ok(Self {
            body,
            food,
            direction: Direction::Right,
            score: 0,
            high_score,
            phase: Phase::Running,
            wrap,
            death_reason: None,
            tick_count: 0,
            bounds,
            tick_interval: TICK_START,
            saved_high_score: high_score,
            store,
            rng,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Wall-clock budget for the next tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.tick_count += 1;
        let mut new_head = add(self.body.head(), self.direction.delta());

        if self.wrap {
            new_head = wrap(new_head, self.bounds);
        } else if !self.bounds.in_interior(new_head) {
            self.enter_game_over(DeathReason::WallCollision);
            return;
        }

        // The tail cell empties this tick unless food is eaten.
        if self.body.contains(new_head) && new_head != self.body.tail() {
            self.enter_game_over(DeathReason::SelfCollision);
            return;
        }

        let ate = new_head == self.food;
        self.body.push_head(new_head);

        if ate {
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.tick_interval = calc_tick(self.score);

            if self.body.len() >= self.bounds.playable_cells() {
                self.enter_game_over(DeathReason::BoardFilled);
                return;
            }

            self.food = place_food(&mut self.rng, self.bounds, &self.body);
            debug!("food eaten, score {}, next food at {:?}", self.score, self.food);
        } else {
            let _ = self.body.pop_tail();
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.phase == Phase::Running
                    && direction_change_is_valid(self.direction, direction)
                {
                    self.direction = direction;
                }
            }
            GameInput::Pause => {
                self.phase = match self.phase {
                    Phase::Running => Phase::Paused,
                    Phase::Paused => Phase::Running,
                    Phase::GameOver => Phase::GameOver,
                };
            }
            GameInput::ToggleWrap => {
                self.wrap = !self.wrap;
                info!("wrap mode {}", if self.wrap { "on" } else { "off" });
            }
            GameInput::Restart => {
                if self.phase == Phase::GameOver {
                    self.restart();
                }
            }
            GameInput::Quit | GameInput::Other => {}
        }
    }

    /// Adapts to new terminal dimensions without advancing the game.
    pub fn resize(&mut self, bounds: GridSize) {
        if bounds == self.bounds {
            return;
        }

        info!(
            "resized from {}x{} to {}x{}",
            self.bounds.height, self.bounds.width, bounds.height, bounds.width
        );
        self.bounds = bounds;
        self.body.clamp_head(bounds);

        if !bounds.in_interior(self.food) || self.body.contains(self.food) {
            self.food = place_food(&mut self.rng, bounds, &self.body);
        }
    }

    /// Starts a fresh game on the same grid, keeping wrap mode and high score.
    pub fn restart(&mut self) {
        self.body = spawn_body(self.bounds);
        self.food = place_food(&mut self.rng, self.bounds, &self.body);
        self.direction = Direction::Right;
        self.score = 0;
        self.phase = Phase::Running;
        self.death_reason = None;
        self.tick_count = 0;
        self.tick_interval = TICK_START;
        info!("restarted, high score {}", self.high_score);
    }

    fn enter_game_over(&mut self, reason: DeathReason) {
        self.phase = Phase::GameOver;
        self.death_reason = Some(reason);
        info!(
            "game over ({reason:?}) after {} ticks, score {}",
            self.tick_count, self.score
        );

        if self.high_score == self.saved_high_score {
            return;
        }

        match self.store.save(self.high_score) {
            Ok(()) => {
                self.saved_high_score = self.high_score;
                info!("new high score {} saved", self.high_score);
            }
            Err(error) => warn!("failed to save high score {}: {error}", self.high_score),
        }
    }
}

fn spawn_body(bounds: GridSize) -> Body {
    let head = Point::new(i32::from(bounds.height / 2), i32::from(bounds.width / 2));
    Body::straight(head, Direction::Right, START_LENGTH)
}
