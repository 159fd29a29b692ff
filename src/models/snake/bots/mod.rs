pub mod move_to_closest_apple_bot;
pub mod random_snake_bot;
