//! Module for containing the snake body and its steering.
use std::collections::VecDeque;

use log::debug;

use super::snake_direction::SnakeDirection;

/// The snake controlled by the player in the [`crate::models::snake::snake_game::SnakeGame`].
///
/// Segments are stored head first. At most one direction change is buffered
/// between two ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakePlayer {
    pub squares_taken: VecDeque<(usize, usize)>,
    direction: SnakeDirection,
    pending_direction: Option<SnakeDirection>,
}

impl SnakePlayer {
    /// Creates a single segment snake at `(row, col)`.
    #[must_use]
    pub fn new(row: usize, col: usize, direction: SnakeDirection) -> Self {
        let mut squares_taken = VecDeque::new();
        squares_taken.push_front((row, col));
        Self {
            squares_taken,
            direction,
            pending_direction: None,
        }
    }

    /// Creates a snake from an explicit list of segments, head first.
    #[must_use]
    pub fn from_segments(segments: Vec<(usize, usize)>, direction: SnakeDirection) -> Self {
        Self {
            squares_taken: segments.into(),
            direction,
            pending_direction: None,
        }
    }

    /// Returns the head of the snake.
    #[must_use]
    pub fn get_head(&self) -> Option<(usize, usize)> {
        self.squares_taken.front().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.squares_taken.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares_taken.is_empty()
    }

    #[must_use]
    pub fn occupies(&self, cell: (usize, usize)) -> bool {
        self.squares_taken.contains(&cell)
    }

    /// Direction the snake travelled on its last tick.
    #[must_use]
    pub fn direction(&self) -> SnakeDirection {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<SnakeDirection> {
        self.pending_direction
    }

    /// Buffers `direction` for the next tick.
    ///
    /// Returns false and keeps the previous request if `direction` reverses the
    /// current direction of travel. A valid request replaces any earlier one.
    pub fn push_direction(&mut self, direction: SnakeDirection) -> bool {
        if direction.is_opposite(self.direction) {
            debug!("Ignoring {direction} while travelling {}", self.direction);
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Consumes the buffered request and returns the direction for this tick.
    pub fn pop_next_direction(&mut self) -> SnakeDirection {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }
        self.direction
    }

    pub fn clear_pending(&mut self) {
        self.pending_direction = None;
    }

    /// Builds the body the snake would have after moving its head to `new_head`.
    /// The tail is kept when `grow` is true.
    #[must_use]
    pub fn moved_body(&self, new_head: (usize, usize), grow: bool) -> VecDeque<(usize, usize)> {
        let mut body = self.squares_taken.clone();
        body.push_front(new_head);
        if !grow {
            body.pop_back();
        }
        body
    }
}
