//! Cardinal directions the snake travels in.
use rand::Rng;

/// Direction a snake can travel on the grid.
///
/// Grid coordinates are `(row, col)`, so [`SnakeDirection::Up`] decreases the row
/// and [`SnakeDirection::Left`] decreases the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnakeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeDirection {
    pub const VARIANTS: &'static [SnakeDirection] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit displacement `(row, col)` for one step in this direction.
    #[must_use]
    pub fn value(self) -> (i8, i8) {
        match self {
            SnakeDirection::Up => (-1, 0),
            SnakeDirection::Down => (1, 0),
            SnakeDirection::Left => (0, -1),
            SnakeDirection::Right => (0, 1),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> SnakeDirection {
        match self {
            SnakeDirection::Up => SnakeDirection::Down,
            SnakeDirection::Down => SnakeDirection::Up,
            SnakeDirection::Left => SnakeDirection::Right,
            SnakeDirection::Right => SnakeDirection::Left,
        }
    }

    /// Returns true if turning from `self` to `other` would be a 180 degree turn.
    #[must_use]
    pub fn is_opposite(self, other: SnakeDirection) -> bool {
        self.get_opposite() == other
    }

    /// Applies this direction to `from`, returning `None` if the step would
    /// leave a `grid_size` x `grid_size` grid.
    #[must_use]
    pub fn step_from(self, from: (usize, usize), grid_size: usize) -> Option<(usize, usize)> {
        let (dr, dc) = self.value();
        let row = from.0.checked_add_signed(isize::from(dr))?;
        let col = from.1.checked_add_signed(isize::from(dc))?;
        if row >= grid_size || col >= grid_size {
            return None;
        }
        Some((row, col))
    }

    #[must_use]
    pub fn get_random_direction<R: Rng + ?Sized>(rng: &mut R) -> SnakeDirection {
        SnakeDirection::VARIANTS[rng.gen_range(0..SnakeDirection::VARIANTS.len())]
    }
}

impl std::fmt::Display for SnakeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeDirection::Up => write!(f, "UP"),
            SnakeDirection::Down => write!(f, "DOWN"),
            SnakeDirection::Left => write!(f, "LEFT"),
            SnakeDirection::Right => write!(f, "RIGHT"),
        }
    }
}
