use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::models::snake::{
    snake_bot::SnakeBot, snake_direction::SnakeDirection, snake_snapshot::SnakeSnapshot,
};

/// Turns at random, avoiding walls and its own body when it can.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SnakeBot for RandomBot {
    fn next_direction(&mut self, snapshot: &SnakeSnapshot) -> Option<SnakeDirection> {
        let head = snapshot.head()?;
        let candidates: Vec<SnakeDirection> = SnakeDirection::VARIANTS
            .iter()
            .copied()
            .filter(|d| !d.is_opposite(snapshot.direction))
            .collect();
        let safe: Vec<SnakeDirection> = candidates
            .iter()
            .copied()
            .filter(|d| {
                d.step_from(head, snapshot.grid_size)
                    .is_some_and(|cell| snapshot.is_free_next_tick(cell))
            })
            .collect();
        if safe.is_empty() {
            candidates.choose(&mut self.rng).copied()
        } else {
            safe.choose(&mut self.rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snake::{snake_config::GameConfig, snake_game::SnakeGame};

    #[test]
    fn test_never_reverses() {
        let mut bot = RandomBot::new(Some(5));
        let game = SnakeGame::with_layout(
            GameConfig::new(20).with_seed(1),
            vec![(5, 5), (5, 4), (5, 3)],
            SnakeDirection::Right,
            Some((10, 10)),
        )
        .unwrap();
        let snap = game.snapshot();
        for _ in 0..100 {
            assert_ne!(bot.next_direction(&snap), Some(SnakeDirection::Left));
        }
    }

    #[test]
    fn test_avoids_walls() {
        let mut bot = RandomBot::new(Some(6));
        let game = SnakeGame::with_layout(
            GameConfig::new(20).with_seed(1),
            vec![(0, 0)],
            SnakeDirection::Up,
            Some((10, 10)),
        )
        .unwrap();
        let snap = game.snapshot();
        for _ in 0..100 {
            assert_eq!(bot.next_direction(&snap), Some(SnakeDirection::Right));
        }
    }

    #[test]
    fn test_keeps_a_seeded_game_alive_for_a_while() {
        let mut bot = RandomBot::new(Some(7));
        let mut game = SnakeGame::new(GameConfig::new(20).with_seed(7)).unwrap();
        for _ in 0..15 {
            let snap = game.snapshot();
            if let Some(direction) = bot.next_direction(&snap) {
                game.request_direction_change(direction);
            }
            assert!(!game.tick().game_over);
        }
    }
}
