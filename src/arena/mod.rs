//! Experiment harness: play complete games between two agents and tally
//! the results.

pub mod metrics;
mod runner;

pub use metrics::{GameRecord, MatchSummary};
pub use runner::{play_game, Arena, ArenaConfig};
