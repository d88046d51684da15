use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect4_search::ai::StrategyKind;
use connect4_search::config::AppConfig;
use connect4_search::game::Player;
use connect4_search::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four against a search agent in the terminal.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect Four against a search agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Opponent strategy: minimax, expectimax, or random
    #[arg(long)]
    ai: Option<StrategyKind>,

    /// Override the opponent's search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Let the AI take the first move (it plays Max, you play Min)
    #[arg(long)]
    ai_first: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // No tracing subscriber here: log output would corrupt the screen
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // The AI uses the seat it plays from the config
    let ai_player = if cli.ai_first { Player::Max } else { Player::Min };
    let seat = match ai_player {
        Player::Max => &mut config.max_agent,
        Player::Min => &mut config.min_agent,
    };
    if let Some(strategy) = cli.ai {
        seat.strategy = strategy;
    }
    if let Some(depth) = cli.depth {
        seat.depth = depth;
    }
    config.validate()?;

    let ai = config.agent(ai_player);
    let mut app = App::new(ai, config.board.rows, config.board.cols);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even if the app loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    Ok(res?)
}
