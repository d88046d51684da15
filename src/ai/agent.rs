use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::evaluation::Evaluator;
use super::expectimax::Expectimax;
use super::minimax::Minimax;
use super::random::RandomAgent;
use crate::error::{SearchError, UnknownStrategy};
use crate::game::{Board, Player};

/// The available move-selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Minimax,
    Expectimax,
    Random,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Minimax => "minimax",
            StrategyKind::Expectimax => "expectimax",
            StrategyKind::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(StrategyKind::Minimax),
            "expectimax" => Ok(StrategyKind::Expectimax),
            "random" => Ok(StrategyKind::Random),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// A player bound to a strategy. Search agents also carry their depth; the
/// random baseline ignores depth.
#[derive(Debug, Clone)]
pub enum Agent {
    Minimax {
        search: Minimax,
        depth: usize,
        player: Player,
    },
    Expectimax {
        search: Expectimax,
        depth: usize,
        player: Player,
    },
    Random {
        rng: RandomAgent,
        player: Player,
    },
}

impl Agent {
    pub fn new(kind: StrategyKind, depth: usize, player: Player) -> Self {
        Self::with_evaluator(kind, depth, player, Evaluator::default())
    }

    pub fn with_evaluator(kind: StrategyKind, depth: usize, player: Player, evaluator: Evaluator) -> Self {
        match kind {
            StrategyKind::Minimax => Agent::Minimax {
                search: Minimax::new(evaluator),
                depth,
                player,
            },
            StrategyKind::Expectimax => Agent::Expectimax {
                search: Expectimax::new(evaluator),
                depth,
                player,
            },
            StrategyKind::Random => Agent::Random {
                rng: RandomAgent::new(),
                player,
            },
        }
    }

    /// Random baseline with a fixed seed.
    pub fn seeded_random(player: Player, seed: u64) -> Self {
        Agent::Random {
            rng: RandomAgent::with_seed(seed),
            player,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Agent::Minimax { .. } => StrategyKind::Minimax,
            Agent::Expectimax { .. } => StrategyKind::Expectimax,
            Agent::Random { .. } => StrategyKind::Random,
        }
    }

    /// The player this agent moves for.
    pub fn player(&self) -> Player {
        match self {
            Agent::Minimax { player, .. }
            | Agent::Expectimax { player, .. }
            | Agent::Random { player, .. } => *player,
        }
    }

    /// Search depth, or `None` for the random baseline.
    pub fn depth(&self) -> Option<usize> {
        match self {
            Agent::Minimax { depth, .. } | Agent::Expectimax { depth, .. } => Some(*depth),
            Agent::Random { .. } => None,
        }
    }

    /// Return the agent's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Agent::Minimax { .. } => "Minimax",
            Agent::Expectimax { .. } => "Expectimax",
            Agent::Random { .. } => "Random",
        }
    }

    /// Select a column for this agent's player on `board`.
    pub fn choose_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        match self {
            Agent::Minimax {
                search,
                depth,
                player,
            } => search.best_move(board, *depth, *player).map(|r| r.column),
            Agent::Expectimax {
                search,
                depth,
                player,
            } => search.best_move(board, *depth, *player).map(|r| r.column),
            Agent::Random { rng, .. } => rng.choose_move(board),
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth() {
            Some(depth) => write!(f, "{} (depth {})", self.name(), depth),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameOutcome, GameState};

    const KINDS: [StrategyKind; 3] = [
        StrategyKind::Minimax,
        StrategyKind::Expectimax,
        StrategyKind::Random,
    ];

    #[test]
    fn strategy_kind_parses_and_displays() {
        for kind in KINDS {
            assert_eq!(kind.to_string().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!(" Minimax ".parse::<StrategyKind>(), Ok(StrategyKind::Minimax));
        assert_eq!(
            "negamax".parse::<StrategyKind>(),
            Err(UnknownStrategy("negamax".to_string()))
        );
    }

    #[test]
    fn agent_reports_identity() {
        let agent = Agent::new(StrategyKind::Expectimax, 3, Player::Min);
        assert_eq!(agent.kind(), StrategyKind::Expectimax);
        assert_eq!(agent.player(), Player::Min);
        assert_eq!(agent.depth(), Some(3));
        assert_eq!(agent.name(), "Expectimax");
        assert_eq!(agent.to_string(), "Expectimax (depth 3)");

        let random = Agent::new(StrategyKind::Random, 5, Player::Max);
        assert_eq!(random.depth(), None);
        assert_eq!(random.to_string(), "Random");
    }

    #[test]
    fn single_legal_move_for_every_strategy() {
        let board: Board = "XOXO.OX
                            OXOOXXO
                            OXXXOXO
                            OXOOOXX
                            XOOOXOX
                            XXOXOXO"
            .parse()
            .unwrap();
        for kind in KINDS {
            for depth in [1, 3] {
                for player in [Player::Max, Player::Min] {
                    let mut agent = Agent::new(kind, depth, player);
                    assert_eq!(agent.choose_move(&board), Ok(4), "{agent}");
                }
            }
        }
    }

    #[test]
    fn no_legal_moves_for_every_strategy() {
        let board: Board = "XOXO\nXOXO\nOXOX\nOXOX".parse().unwrap();
        for kind in KINDS {
            let mut agent = Agent::new(kind, 2, Player::Max);
            assert_eq!(agent.choose_move(&board), Err(SearchError::NoLegalMoves));
        }
    }

    #[test]
    fn agent_plays_for_its_own_player() {
        // Min wins at column 3; Max would block there too, but Min moves
        let board: Board = ".......
                            .......
                            .......
                            O......
                            OX.....
                            OXX.X.."
            .parse()
            .unwrap();
        let mut agent = Agent::new(StrategyKind::Minimax, 2, Player::Min);
        assert_eq!(agent.choose_move(&board), Ok(3));
    }

    #[test]
    fn minimax_beats_random() {
        let games = 10;
        let mut minimax_wins = 0;

        for seed in 0..games {
            let mut minimax = Agent::new(StrategyKind::Minimax, 3, Player::Max);
            let mut random = Agent::seeded_random(Player::Min, seed);
            let mut state = GameState::default();

            while !state.is_terminal() {
                let agent = match state.current_player() {
                    Player::Max => &mut minimax,
                    Player::Min => &mut random,
                };
                let action = agent.choose_move(state.board()).unwrap();
                state = state.apply_move(action).unwrap();
            }

            if state.outcome() == Some(GameOutcome::Winner(Player::Max)) {
                minimax_wins += 1;
            }
        }

        assert!(
            minimax_wins >= 8,
            "Minimax should beat random, won {minimax_wins}/{games}"
        );
    }
}
