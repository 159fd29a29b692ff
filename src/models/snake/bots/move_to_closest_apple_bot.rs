use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::models::snake::{
    snake_bot::SnakeBot, snake_direction::SnakeDirection, snake_snapshot::SnakeSnapshot,
};

/// Follows the shortest free path to the food.
#[derive(Debug, Default)]
pub struct MoveToClosestAppleBot;

impl MoveToClosestAppleBot {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Breadth first search from the head to the food over cells that are free
    /// on the next tick. Returns the first step of a shortest path.
    fn find_closest_reachable_apple(snapshot: &SnakeSnapshot) -> Option<SnakeDirection> {
        let head = snapshot.head()?;
        let food = snapshot.food?;
        let size = snapshot.grid_size;

        let mut visited = HashSet::from([head]);
        let mut queue = VecDeque::new();
        for first in SnakeDirection::VARIANTS {
            if first.is_opposite(snapshot.direction) {
                continue;
            }
            let Some(cell) = first.step_from(head, size) else {
                continue;
            };
            if !snapshot.is_free_next_tick(cell) || !visited.insert(cell) {
                continue;
            }
            if cell == food {
                return Some(*first);
            }
            queue.push_back((cell, *first));
        }

        while let Some((cell, first)) = queue.pop_front() {
            for direction in SnakeDirection::VARIANTS {
                let Some(next) = direction.step_from(cell, size) else {
                    continue;
                };
                if !snapshot.is_free_next_tick(next) || !visited.insert(next) {
                    continue;
                }
                if next == food {
                    return Some(first);
                }
                queue.push_back((next, first));
            }
        }
        None
    }

    fn any_safe_move(snapshot: &SnakeSnapshot) -> Option<SnakeDirection> {
        let head = snapshot.head()?;
        SnakeDirection::VARIANTS.iter().copied().find(|d| {
            !d.is_opposite(snapshot.direction)
                && d.step_from(head, snapshot.grid_size)
                    .is_some_and(|cell| snapshot.is_free_next_tick(cell))
        })
    }
}

impl SnakeBot for MoveToClosestAppleBot {
    fn next_direction(&mut self, snapshot: &SnakeSnapshot) -> Option<SnakeDirection> {
        if snapshot.game_over {
            return None;
        }
        if let Some(direction) = Self::find_closest_reachable_apple(snapshot) {
            return Some(direction);
        }
        debug!("No path to the food. Looking for any safe move");
        Self::any_safe_move(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snake::{snake_config::GameConfig, snake_game::SnakeGame};

    fn snapshot(
        body: Vec<(usize, usize)>,
        direction: SnakeDirection,
        food: (usize, usize),
    ) -> SnakeSnapshot {
        SnakeGame::with_layout(GameConfig::new(10).with_seed(3), body, direction, Some(food))
            .unwrap()
            .snapshot()
    }

    #[test]
    fn test_heads_for_the_food() {
        let mut bot = MoveToClosestAppleBot::new();
        let snap = snapshot(vec![(5, 5)], SnakeDirection::Right, (5, 9));
        assert_eq!(bot.next_direction(&snap), Some(SnakeDirection::Right));
        let snap = snapshot(vec![(5, 5)], SnakeDirection::Right, (1, 5));
        assert_eq!(bot.next_direction(&snap), Some(SnakeDirection::Up));
    }

    #[test]
    fn test_does_not_reverse_towards_food_behind() {
        let mut bot = MoveToClosestAppleBot::new();
        let snap = snapshot(vec![(5, 5), (5, 4)], SnakeDirection::Right, (5, 1));
        let direction = bot.next_direction(&snap);
        assert!(matches!(
            direction,
            Some(SnakeDirection::Up | SnakeDirection::Down)
        ));
    }

    #[test]
    fn test_routes_around_its_body() {
        let mut bot = MoveToClosestAppleBot::new();
        // A wall of body segments sits between the head and the food.
        let snap = snapshot(
            vec![(5, 5), (4, 5), (4, 6), (5, 6), (6, 6), (7, 6)],
            SnakeDirection::Down,
            (5, 8),
        );
        let direction = bot.next_direction(&snap);
        assert!(matches!(
            direction,
            Some(SnakeDirection::Down | SnakeDirection::Left)
        ));
    }

    #[test]
    fn test_trapped_snake_has_no_move() {
        let mut bot = MoveToClosestAppleBot::new();
        // head in the corner, both free neighbours taken by the body
        let snap = snapshot(
            vec![(0, 0), (1, 0), (1, 1), (0, 1), (0, 2)],
            SnakeDirection::Up,
            (9, 9),
        );
        assert_eq!(bot.next_direction(&snap), None);
    }

    #[test]
    fn test_eats_several_apples() {
        let mut bot = MoveToClosestAppleBot::new();
        let mut game = SnakeGame::new(GameConfig::new(10).with_seed(11)).unwrap();
        for _ in 0..2_000 {
            let snap = game.snapshot();
            if snap.game_over {
                game.reset();
                continue;
            }
            if let Some(direction) = bot.next_direction(&snap) {
                game.request_direction_change(direction);
            }
            game.tick();
        }
        assert!(game.get_high_score() >= 5);
    }
}
