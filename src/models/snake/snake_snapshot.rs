//! Read-only view of a [`crate::models::snake::snake_game::SnakeGame`] handed to hosts and bots.
use super::{
    snake_direction::SnakeDirection,
    snake_game::{GameOverReason, GameStatus},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    /// Segments, head first.
    pub snake: Vec<(usize, usize)>,
    /// `None` once the snake fills the grid.
    pub food: Option<(usize, usize)>,
    pub direction: SnakeDirection,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    /// Whether food was eaten on the tick that produced this snapshot.
    pub ate_food: bool,
    pub grid_size: usize,
    /// Ticks survived in the current episode.
    pub steps: u64,
}

impl SnakeSnapshot {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.game_over_reason {
            Some(reason) => GameStatus::GameOver(reason),
            None => GameStatus::Running,
        }
    }

    #[must_use]
    pub fn head(&self) -> Option<(usize, usize)> {
        self.snake.first().copied()
    }

    /// Whether `cell` is inside the grid and not blocked by the body once the snake
    /// takes its next step. The tail counts as free since it moves away.
    #[must_use]
    pub fn is_free_next_tick(&self, cell: (usize, usize)) -> bool {
        if cell.0 >= self.grid_size || cell.1 >= self.grid_size {
            return false;
        }
        match self.snake.split_last() {
            Some((_, rest)) => !rest.contains(&cell),
            None => true,
        }
    }
}
