use super::{
    bots::{move_to_closest_apple_bot::MoveToClosestAppleBot, random_snake_bot::RandomBot},
    snake_direction::SnakeDirection,
    snake_snapshot::SnakeSnapshot,
};

/// Host side source of direction requests.
///
/// Bots only see a [`SnakeSnapshot`] and their answer still goes through
/// [`crate::models::snake::snake_game::SnakeGame::request_direction_change`].
pub trait SnakeBot {
    /// Direction to request before the next tick, or `None` to keep going straight.
    fn next_direction(&mut self, snapshot: &SnakeSnapshot) -> Option<SnakeDirection>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeBotType {
    RandomMoveBot,
    MoveToClosestAppleBot,
}

impl SnakeBotType {
    pub const VALUES: [Self; 2] = [Self::RandomMoveBot, Self::MoveToClosestAppleBot];

    #[must_use]
    pub fn make_new_bot(self, seed: Option<u64>) -> Box<dyn SnakeBot + Send> {
        match self {
            SnakeBotType::RandomMoveBot => Box::new(RandomBot::new(seed)),
            SnakeBotType::MoveToClosestAppleBot => Box::new(MoveToClosestAppleBot::new()),
        }
    }
}

impl std::fmt::Display for SnakeBotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeBotType::RandomMoveBot => write!(f, "Randomly Moving Bot"),
            SnakeBotType::MoveToClosestAppleBot => write!(f, "Move To Closest Apple Bot"),
        }
    }
}
