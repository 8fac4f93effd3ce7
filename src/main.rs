use anyhow::{ensure, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_snake::app::App;
use grid_snake::game::GameConfig;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid-based snake for the terminal")]
struct Cli {
    /// Cells per side of the square board
    #[arg(long, default_value_t = 20)]
    grid_size: usize,

    /// Snake length after a reset
    #[arg(long, default_value_t = 3)]
    initial_length: usize,

    /// Logic updates per second
    #[arg(long, default_value_t = 10)]
    tick_rate: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // The board draws on stderr, so stdout log lines do not tear the UI.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    ensure!(cli.grid_size >= 2, "grid size must be at least 2");
    ensure!(
        cli.initial_length >= 1 && cli.initial_length <= cli.grid_size,
        "initial length must fit on the top row of the board"
    );
    ensure!(cli.tick_rate >= 1, "tick rate must be at least 1");

    let config = GameConfig {
        grid_size: cli.grid_size,
        initial_length: cli.initial_length,
        ticks_per_second: cli.tick_rate,
    };

    info!(
        grid_size = config.grid_size,
        tick_rate = config.ticks_per_second,
        "starting session"
    );

    App::new(config).run().await
}
