use std::collections::{HashSet, VecDeque};

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    food::place_food, snake_config::GameConfig, snake_direction::SnakeDirection,
    snake_player::SnakePlayer, snake_snapshot::SnakeSnapshot,
};

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize(usize),
    InvalidLayout(String),
    HostClosed,
}

impl std::fmt::Display for SnakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeError::InvalidBoardSize(size) => {
                write!(f, "invalid grid size {size}, must be greater than 0")
            }
            SnakeError::InvalidLayout(reason) => write!(f, "invalid starting layout: {reason}"),
            SnakeError::HostClosed => write!(f, "snake host is no longer running"),
        }
    }
}

impl std::error::Error for SnakeError {}

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    /// The snake covers every cell so no food can be placed. Counts as a win.
    BoardFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(GameOverReason),
}

impl GameStatus {
    #[must_use]
    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::GameOver(_))
    }
}

fn validate_grid_size(grid_size: usize) -> Result<()> {
    if grid_size == 0 {
        return Err(SnakeError::InvalidBoardSize(grid_size));
    }
    Ok(())
}

/// Model of the Snake Game.
///
/// Owns the snake, the food, the score and the high score. A host calls
/// [`SnakeGame::tick`] at a fixed cadence and forwards player input through
/// [`SnakeGame::request_direction_change`]. The high score survives
/// [`SnakeGame::reset`] for the lifetime of the value.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: GameConfig,
    grid_size: usize,
    next_grid_size: Option<usize>,
    player: SnakePlayer,
    food: Option<(usize, usize)>,
    score: u32,
    high_score: u32,
    status: GameStatus,
    ate_food: bool,
    steps: u64,
    rng: StdRng,
}

impl SnakeGame {
    /// Creates a new game and starts its first episode.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if the configured grid size is 0.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut game = Self::blank(config)?;
        game.start_episode();
        Ok(game)
    }

    /// Creates a game whose first episode starts from an explicit layout.
    /// `body` is head first. Food is generated when `food` is `None`.
    /// Later resets go back to the layout described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] for a grid size of 0 and
    /// [`SnakeError::InvalidLayout`] if the body is empty, leaves the grid,
    /// overlaps itself or has gaps between consecutive segments, if `direction`
    /// points back into the neck, or if the food is off the grid or on the body.
    pub fn with_layout(
        config: GameConfig,
        body: Vec<(usize, usize)>,
        direction: SnakeDirection,
        food: Option<(usize, usize)>,
    ) -> Result<Self> {
        let mut game = Self::blank(config)?;
        let grid_size = game.grid_size;
        let in_bounds = |cell: &(usize, usize)| cell.0 < grid_size && cell.1 < grid_size;

        if body.is_empty() {
            return Err(SnakeError::InvalidLayout("snake has no segments".to_string()));
        }
        if let Some(cell) = body.iter().find(|cell| !in_bounds(*cell)) {
            return Err(SnakeError::InvalidLayout(format!(
                "segment {cell:?} is outside a {grid_size}x{grid_size} grid"
            )));
        }
        let mut seen = HashSet::with_capacity(body.len());
        if let Some(cell) = body.iter().find(|cell| !seen.insert(**cell)) {
            return Err(SnakeError::InvalidLayout(format!(
                "segment {cell:?} appears twice"
            )));
        }
        if let Some(pair) = body
            .windows(2)
            .find(|pair| pair[0].0.abs_diff(pair[1].0) + pair[0].1.abs_diff(pair[1].1) != 1)
        {
            return Err(SnakeError::InvalidLayout(format!(
                "segments {:?} and {:?} are not next to each other",
                pair[0], pair[1]
            )));
        }
        if body.len() > 1 && direction.step_from(body[0], grid_size) == Some(body[1]) {
            return Err(SnakeError::InvalidLayout(format!(
                "moving {direction} from the head runs back into the neck"
            )));
        }
        if let Some(cell) = food {
            if !in_bounds(&cell) || body.contains(&cell) {
                return Err(SnakeError::InvalidLayout(format!(
                    "food {cell:?} is off the grid or on the snake"
                )));
            }
        }

        game.player = SnakePlayer::from_segments(body, direction);
        game.food = match food {
            Some(cell) => Some(cell),
            None => place_food(&mut game.rng, grid_size, &game.player),
        };
        if game.food.is_none() {
            game.end_episode(GameOverReason::BoardFull);
        }
        Ok(game)
    }

    fn blank(config: GameConfig) -> Result<Self> {
        validate_grid_size(config.grid_size)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid_size = config.grid_size;
        let head = config.starting_head(grid_size);
        Ok(Self {
            player: SnakePlayer::new(head.0, head.1, config.initial_direction),
            config,
            grid_size,
            next_grid_size: None,
            food: None,
            score: 0,
            high_score: 0,
            status: GameStatus::Running,
            ate_food: false,
            steps: 0,
            rng,
        })
    }

    fn start_episode(&mut self) {
        if let Some(size) = self.next_grid_size.take() {
            debug!("Applying grid size {size} (was {})", self.grid_size);
            self.grid_size = size;
        }
        let head = self.config.starting_head(self.grid_size);
        self.player = SnakePlayer::new(head.0, head.1, self.config.initial_direction);
        self.score = 0;
        self.status = GameStatus::Running;
        self.ate_food = false;
        self.steps = 0;
        self.food = match self.config.starting_food(self.grid_size) {
            Some(cell) => Some(cell),
            None => place_food(&mut self.rng, self.grid_size, &self.player),
        };
        if self.food.is_none() {
            self.end_episode(GameOverReason::BoardFull);
        }
    }

    fn end_episode(&mut self, reason: GameOverReason) {
        info!(
            "Game over ({reason:?}) after {} steps. Score {} high score {}",
            self.steps, self.score, self.high_score
        );
        self.status = GameStatus::GameOver(reason);
        self.player.clear_pending();
    }

    /// Advances the game by one step.
    ///
    /// Does nothing once the game is over; the returned snapshot then reports
    /// the unchanged state with `ate_food` cleared.
    pub fn tick(&mut self) -> SnakeSnapshot {
        self.ate_food = false;
        if let GameStatus::GameOver(reason) = self.status {
            debug!("Tick ignored, game is over ({reason:?})");
            return self.snapshot();
        }

        let direction = self.player.pop_next_direction();
        let Some(head) = self.player.get_head() else {
            warn!("Snake has no segments. Ending the episode");
            self.end_episode(GameOverReason::HitSelf);
            return self.snapshot();
        };
        let Some(new_head) = direction.step_from(head, self.grid_size) else {
            debug!("Snake went out of bounds moving {direction} from {head:?}");
            self.end_episode(GameOverReason::HitWall);
            return self.snapshot();
        };

        // The vacated tail only frees its cell when the snake does not grow.
        let grow = self.food == Some(new_head);
        let body = self.player.moved_body(new_head, grow);
        if body.iter().skip(1).any(|cell| *cell == new_head) {
            debug!("Snake ran into itself at {new_head:?}");
            self.end_episode(GameOverReason::HitSelf);
            return self.snapshot();
        }

        self.player.squares_taken = body;
        self.steps += 1;
        if grow {
            self.ate_food = true;
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
                info!("New high score {}", self.high_score);
            }
            self.food = place_food(&mut self.rng, self.grid_size, &self.player);
            if self.food.is_none() {
                warn!("Snake fills the whole {0}x{0} grid", self.grid_size);
                self.end_episode(GameOverReason::BoardFull);
            }
        }
        self.snapshot()
    }

    /// Requests a turn for the next tick. Reversals and requests made after the
    /// game ended are ignored. Returns whether the request was accepted.
    pub fn request_direction_change(&mut self, direction: SnakeDirection) -> bool {
        if self.status.is_game_over() {
            debug!("Ignoring {direction}, game is over");
            return false;
        }
        self.player.push_direction(direction)
    }

    /// Starts a new episode, keeping the high score.
    pub fn reset(&mut self) -> SnakeSnapshot {
        self.start_episode();
        info!(
            "New episode on a {0}x{0} grid. High score {1}",
            self.grid_size, self.high_score
        );
        self.snapshot()
    }

    /// Sets the grid size used from the next [`SnakeGame::reset`] on.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] for a size of 0 and leaves the
    /// configuration unchanged.
    pub fn configure_grid(&mut self, grid_size: usize) -> Result<()> {
        if let Err(e) = validate_grid_size(grid_size) {
            warn!("Rejecting grid size {grid_size}");
            return Err(e);
        }
        debug!("Grid size {grid_size} will apply on the next reset");
        self.next_grid_size = Some(grid_size);
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> SnakeSnapshot {
        let game_over_reason = match self.status {
            GameStatus::GameOver(reason) => Some(reason),
            GameStatus::Running => None,
        };
        SnakeSnapshot {
            snake: self.player.squares_taken.iter().copied().collect(),
            food: self.food,
            direction: self.player.direction(),
            score: self.score,
            high_score: self.high_score,
            game_over: game_over_reason.is_some(),
            game_over_reason,
            ate_food: self.ate_food,
            grid_size: self.grid_size,
            steps: self.steps,
        }
    }

    #[must_use]
    pub fn get_snake(&self) -> &VecDeque<(usize, usize)> {
        &self.player.squares_taken
    }

    #[must_use]
    pub fn get_player(&self) -> &SnakePlayer {
        &self.player
    }

    #[must_use]
    pub fn get_food(&self) -> Option<(usize, usize)> {
        self.food
    }

    #[must_use]
    pub fn get_score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn get_high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    #[must_use]
    pub fn get_size(&self) -> usize {
        self.grid_size
    }

    #[must_use]
    pub fn get_config(&self) -> &GameConfig {
        &self.config
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        let config = GameConfig::default();
        let grid_size = config.grid_size;
        Self::new(config).unwrap_or_else(|_| unreachable!("default grid size {grid_size} is valid"))
    }
}
