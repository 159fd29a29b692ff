//! Food placement.
use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use super::snake_player::SnakePlayer;

/// Number of uniform draws tried before falling back to enumerating free cells.
pub const MAX_FOOD_ATTEMPTS: usize = 64;

/// Picks a cell uniformly at random among the cells of the grid not taken by `snake`.
///
/// Returns `None` only when the snake covers the whole grid.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    snake: &SnakePlayer,
) -> Option<(usize, usize)> {
    if grid_size == 0 {
        return None;
    }
    for _ in 0..MAX_FOOD_ATTEMPTS {
        let cell = (rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    debug!("No free cell after {MAX_FOOD_ATTEMPTS} draws. Enumerating free cells");
    let mut avaliable = Vec::new();
    for i in 0..grid_size {
        for j in 0..grid_size {
            if !snake.occupies((i, j)) {
                avaliable.push((i, j));
            }
        }
    }
    let choice = avaliable.choose(rng).copied();
    if choice.is_none() {
        warn!("No where left to place food");
    }
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snake::snake_direction::SnakeDirection;
    use rand::{rngs::StdRng, SeedableRng};

    fn snake_filling_rows(grid_size: usize, rows: usize) -> SnakePlayer {
        let mut segments = Vec::new();
        for i in 0..rows {
            for j in 0..grid_size {
                segments.push((i, j));
            }
        }
        SnakePlayer::from_segments(segments, SnakeDirection::Right)
    }

    #[test]
    fn test_food_never_on_snake() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = SnakePlayer::from_segments(
            vec![(5, 6), (5, 5), (5, 4), (4, 4)],
            SnakeDirection::Right,
        );
        for _ in 0..1000 {
            let food = place_food(&mut rng, 8, &snake).unwrap();
            assert!(!snake.occupies(food));
            assert!(food.0 < 8 && food.1 < 8);
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(2);
        let mut snake = snake_filling_rows(6, 6);
        snake.squares_taken.retain(|cell| *cell != (3, 4));
        for _ in 0..20 {
            assert_eq!(place_food(&mut rng, 6, &snake), Some((3, 4)));
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(3);
        let snake = snake_filling_rows(4, 4);
        assert_eq!(place_food(&mut rng, 4, &snake), None);
    }

    #[test]
    fn test_every_free_cell_is_reachable() {
        let mut rng = StdRng::seed_from_u64(4);
        let snake = snake_filling_rows(3, 2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(place_food(&mut rng, 3, &snake).unwrap());
        }
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|cell| cell.0 == 2));
    }
}
