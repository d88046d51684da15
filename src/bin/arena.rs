use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connect4_search::ai::StrategyKind;
use connect4_search::arena::Arena;
use connect4_search::config::AppConfig;
use connect4_search::game::Player;

/// Pit two Connect Four agents against each other and report the tally.
#[derive(Parser)]
#[command(name = "arena", about = "Run Connect Four matches between agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Strategy for the Max seat (moves first)
    #[arg(long)]
    max: Option<StrategyKind>,

    /// Search depth for the Max seat
    #[arg(long)]
    max_depth: Option<usize>,

    /// Strategy for the Min seat
    #[arg(long)]
    min: Option<StrategyKind>,

    /// Search depth for the Min seat
    #[arg(long)]
    min_depth: Option<usize>,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print a config file with all defaults and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(strategy) = cli.max {
        config.max_agent.strategy = strategy;
    }
    if let Some(depth) = cli.max_depth {
        config.max_agent.depth = depth;
    }
    if let Some(strategy) = cli.min {
        config.min_agent.strategy = strategy;
    }
    if let Some(depth) = cli.min_depth {
        config.min_agent.depth = depth;
    }
    if let Some(games) = cli.games {
        config.arena.games = games;
    }
    if cli.seed.is_some() {
        config.arena.seed = cli.seed;
    }
    config.validate()?;

    let mut max_agent = config.agent(Player::Max);
    let mut min_agent = config.agent(Player::Min);
    let arena = Arena::new(config.arena.clone(), config.board.rows, config.board.cols);
    let summary = arena
        .run(&mut max_agent, &mut min_agent)
        .context("match aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} (Max) vs {} (Min), {} games", summary.max_agent, summary.min_agent, summary.games);
        println!("-------------------------------------------");
        println!(
            "Max wins: {} ({:.1}%)",
            summary.max_wins,
            summary.win_rate(Player::Max) * 100.0
        );
        println!(
            "Min wins: {} ({:.1}%)",
            summary.min_wins,
            summary.win_rate(Player::Min) * 100.0
        );
        println!("Draws:    {} ({:.1}%)", summary.draws, summary.draw_rate() * 100.0);
        println!("Average game length: {:.1} moves", summary.average_game_length());
    }

    Ok(())
}
