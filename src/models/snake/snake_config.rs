//! Configuration for a [`crate::models::snake::snake_game::SnakeGame`].
use super::snake_direction::SnakeDirection;

/// Default side length of the square grid.
pub const DEFAULT_GRID_SIZE: usize = 20;
/// Time between two ticks when driven by a host.
pub const MILLIS_BETWEEN_FRAMES: u64 = 150;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square grid. Must be greater than 0.
    pub grid_size: usize,
    /// Starting head cell. Replaced by the grid centre if it does not fit.
    pub initial_head: (usize, usize),
    /// Starting food cell. Generated instead if `None`, off the grid, or on the head.
    pub initial_food: Option<(usize, usize)>,
    pub initial_direction: SnakeDirection,
    pub tick_millis: u64,
    /// Seed for food placement. Seeded from entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_head: (5, 5),
            initial_food: Some((10, 10)),
            initial_direction: SnakeDirection::Right,
            tick_millis: MILLIS_BETWEEN_FRAMES,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Head cell used when an episode starts on a grid of `grid_size`.
    #[must_use]
    pub fn starting_head(&self, grid_size: usize) -> (usize, usize) {
        let (row, col) = self.initial_head;
        if row < grid_size && col < grid_size {
            (row, col)
        } else {
            (grid_size / 2, grid_size / 2)
        }
    }

    /// Food cell used when an episode starts, if the configured one is usable.
    #[must_use]
    pub fn starting_food(&self, grid_size: usize) -> Option<(usize, usize)> {
        let head = self.starting_head(grid_size);
        self.initial_food
            .filter(|&(row, col)| row < grid_size && col < grid_size && (row, col) != head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_head, (5, 5));
        assert_eq!(config.initial_food, Some((10, 10)));
        assert_eq!(config.initial_direction, SnakeDirection::Right);
        assert_eq!(config.tick_millis, 150);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_starting_cells_fit_the_grid() {
        let config = GameConfig::default();
        assert_eq!(config.starting_head(20), (5, 5));
        assert_eq!(config.starting_food(20), Some((10, 10)));

        // food no longer fits
        assert_eq!(config.starting_head(8), (5, 5));
        assert_eq!(config.starting_food(8), None);

        // neither fits
        assert_eq!(config.starting_head(4), (2, 2));
        assert_eq!(config.starting_food(4), None);
    }

    #[test]
    fn test_food_on_head_is_not_used() {
        let config = GameConfig {
            initial_food: Some((5, 5)),
            ..GameConfig::default()
        };
        assert_eq!(config.starting_food(20), None);
    }
}
