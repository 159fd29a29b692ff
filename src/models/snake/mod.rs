//! Rules of a single player snake game on a square grid.
pub mod bots;
pub mod food;
pub mod snake_bot;
pub mod snake_config;
pub mod snake_direction;
pub mod snake_game;
pub mod snake_player;
pub mod snake_snapshot;
