use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridsnake::{
    host::snake_host::SnakeHost,
    models::snake::{
        snake_bot::SnakeBotType,
        snake_config::{GameConfig, DEFAULT_GRID_SIZE, MILLIS_BETWEEN_FRAMES},
        snake_game::SnakeGame,
    },
};
use log::{debug, info, warn};

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Headless snake game driven by an autopilot")]
struct Cli {
    /// Side length of the square grid
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = MILLIS_BETWEEN_FRAMES, value_parser = clap::value_parser!(u64).range(1..))]
    tick_millis: u64,

    /// Number of episodes to play
    #[arg(long, default_value_t = 3)]
    episodes: u32,

    /// Autopilot steering the snake
    #[arg(long, value_enum, default_value_t = Bot::ClosestApple)]
    bot: Bot,

    /// Seed for food placement and the random bot
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on an episode after this many ticks
    #[arg(long, default_value_t = 5_000)]
    max_ticks: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Bot {
    /// Shortest path to the food
    ClosestApple,
    /// Random turns that avoid obvious crashes
    Random,
}

impl From<Bot> for SnakeBotType {
    fn from(bot: Bot) -> Self {
        match bot {
            Bot::ClosestApple => SnakeBotType::MoveToClosestAppleBot,
            Bot::Random => SnakeBotType::RandomMoveBot,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("gridsnake=info"))
        .init();
    let cli = Cli::parse();

    let config = GameConfig {
        grid_size: cli.grid_size,
        tick_millis: cli.tick_millis,
        seed: cli.seed,
        ..GameConfig::default()
    };
    let tick_every = Duration::from_millis(config.tick_millis);
    let game = SnakeGame::new(config).context("Failed to create the game")?;
    let bot_type = SnakeBotType::from(cli.bot);
    let mut bot = bot_type.make_new_bot(cli.seed);
    info!(
        "Playing {} episodes on a {}x{} grid with the {bot_type}",
        cli.episodes, cli.grid_size, cli.grid_size
    );

    let host = SnakeHost::spawn(game, Some(tick_every));
    let mut snapshots = host.subscribe();

    for episode in 1..=cli.episodes {
        if episode > 1 {
            host.reset().await.context("Failed to reset the game")?;
        }
        loop {
            let snapshot = snapshots.borrow_and_update().clone();
            if snapshot.game_over {
                info!(
                    "Episode {episode} ended ({:?}) after {} ticks with score {}",
                    snapshot.game_over_reason, snapshot.steps, snapshot.score
                );
                break;
            }
            if snapshot.steps >= cli.max_ticks {
                warn!("Episode {episode} reached {} ticks. Stopping it", cli.max_ticks);
                break;
            }
            if snapshot.ate_food {
                debug!("Ate food, score {}", snapshot.score);
            }
            if let Some(direction) = bot.next_direction(&snapshot) {
                host.request_direction_change(direction)
                    .context("Failed to steer the snake")?;
            }
            snapshots
                .changed()
                .await
                .context("Host stopped publishing snapshots")?;
        }
    }

    let game = host.shutdown().await.context("Failed to stop the host")?;
    info!("High score {}", game.get_high_score());
    Ok(())
}
