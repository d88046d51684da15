use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::{Agent, Evaluator, HeuristicWeights, StrategyKind};
use crate::arena::ArenaConfig;
use crate::error::ConfigError;
use crate::game::{Player, COLS, ROWS, WINDOW};

/// Deepest search accepted from configuration.
pub const MAX_DEPTH: usize = 10;
/// Largest board dimension accepted from configuration.
pub const MAX_DIMENSION: usize = 16;

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
        }
    }
}

/// Strategy and depth for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: StrategyKind,
    pub depth: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            strategy: StrategyKind::Minimax,
            depth: 4,
        }
    }
}

impl AgentConfig {
    /// Build the agent for `player`. `seed` only affects the random strategy.
    pub fn build(&self, player: Player, weights: HeuristicWeights, seed: Option<u64>) -> Agent {
        match (self.strategy, seed) {
            (StrategyKind::Random, Some(seed)) => Agent::seeded_random(player, seed),
            (strategy, _) => Agent::with_evaluator(strategy, self.depth, player, Evaluator::new(weights)),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub heuristic: HeuristicWeights,
    pub max_agent: AgentConfig,
    pub min_agent: AgentConfig,
    pub arena: ArenaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            heuristic: HeuristicWeights::default(),
            max_agent: AgentConfig::default(),
            min_agent: AgentConfig {
                strategy: StrategyKind::Expectimax,
                ..AgentConfig::default()
            },
            arena: ArenaConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Agent for `player`, built from its seat's configuration.
    pub fn agent(&self, player: Player) -> Agent {
        let seat = match player {
            Player::Max => &self.max_agent,
            Player::Min => &self.min_agent,
        };
        // Distinct seeds so two random seats do not mirror each other
        let seed = self.arena.seed.map(|seed| match player {
            Player::Max => seed,
            Player::Min => seed.wrapping_add(1),
        });
        seat.build(player, self.heuristic, seed)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("board.rows", self.board.rows), ("board.cols", self.board.cols)] {
            if !(WINDOW..=MAX_DIMENSION).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in [{WINDOW}, {MAX_DIMENSION}]"
                )));
            }
        }

        for (name, seat) in [("max_agent", &self.max_agent), ("min_agent", &self.min_agent)] {
            if seat.depth > MAX_DEPTH {
                return Err(ConfigError::Validation(format!(
                    "{name}.depth must be <= {MAX_DEPTH}"
                )));
            }
        }

        let weights = [
            ("heuristic.four", self.heuristic.four),
            ("heuristic.three", self.heuristic.three),
            ("heuristic.two", self.heuristic.two),
            ("heuristic.opponent_three", self.heuristic.opponent_three),
            ("heuristic.center", self.heuristic.center),
        ];
        if let Some((name, _)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ConfigError::Validation(format!("{name} must be finite")));
        }

        if self.arena.games == 0 {
            return Err(ConfigError::Validation("arena.games must be > 0".into()));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
