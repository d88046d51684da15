//! Move selection: static evaluation, alpha-beta minimax, expectimax, and
//! the agents that bind a strategy to a player.

mod agent;
pub mod evaluation;
pub mod expectimax;
pub mod minimax;
mod random;
mod search;

pub use agent::{Agent, StrategyKind};
pub use evaluation::{evaluate, Evaluator, HeuristicWeights};
pub use expectimax::{best_move_expectimax, Expectimax};
pub use minimax::{best_move_minimax, Minimax};
pub use random::RandomAgent;
pub use search::SearchResult;
