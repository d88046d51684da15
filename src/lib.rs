//! # Connect Four Search
//!
//! A Connect Four engine with two game-tree search agents: depth-limited
//! minimax with alpha-beta pruning, and expectimax against a uniformly random
//! opponent. Includes a random baseline, an experiment arena, and a terminal
//! UI for playing against the engine.
//!
//! ## Modules
//!
//! - [`game`] — Board model, players, and a turn-tracking game state
//! - [`ai`] — Static evaluation, minimax, expectimax, and agents
//! - [`arena`] — Play series of games between agents and tally results
//! - [`ui`] — Terminal UI: human versus agent
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
