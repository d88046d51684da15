use serde::{Deserialize, Serialize};

use super::metrics::{GameRecord, MatchSummary};
use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{GameOutcome, GameState, Player, COLS, ROWS};

/// Arena configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub games: usize,
    /// Seed for random agents; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games: 20,
            seed: None,
        }
    }
}

/// Play one full game on a fresh `rows x cols` board. Max moves first.
pub fn play_game(
    max_agent: &mut Agent,
    min_agent: &mut Agent,
    rows: usize,
    cols: usize,
) -> Result<GameRecord, MatchError> {
    check_seat(max_agent, Player::Max)?;
    check_seat(min_agent, Player::Min)?;

    let mut state = GameState::initial(rows, cols);
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let player = state.current_player();
        let agent = match player {
            Player::Max => &mut *max_agent,
            Player::Min => &mut *min_agent,
        };
        let column = agent.choose_move(state.board())?;
        state
            .apply_move_mut(column)
            .map_err(|source| MatchError::IllegalMove {
                player,
                column,
                source,
            })?;
        tracing::trace!(%player, column, "move played");
        moves.push(column);
    }

    let winner = match state.outcome() {
        Some(GameOutcome::Winner(player)) => Some(player),
        _ => None,
    };
    Ok(GameRecord { winner, moves })
}

fn check_seat(agent: &Agent, expected: Player) -> Result<(), MatchError> {
    if agent.player() != expected {
        return Err(MatchError::SeatMismatch {
            expected,
            found: agent.player(),
        });
    }
    Ok(())
}

/// Runs a series of games between two agents on a fixed board size.
pub struct Arena {
    config: ArenaConfig,
    rows: usize,
    cols: usize,
}

impl Arena {
    pub fn new(config: ArenaConfig, rows: usize, cols: usize) -> Self {
        Arena { config, rows, cols }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Play `config.games` games and tally them.
    pub fn run(&self, max_agent: &mut Agent, min_agent: &mut Agent) -> Result<MatchSummary, MatchError> {
        let mut summary = MatchSummary::new(max_agent.to_string(), min_agent.to_string());

        tracing::info!(
            max = %max_agent,
            min = %min_agent,
            games = self.config.games,
            rows = self.rows,
            cols = self.cols,
            "starting match"
        );

        for game in 1..=self.config.games {
            let record = play_game(max_agent, min_agent, self.rows, self.cols)?;
            tracing::debug!(
                game,
                winner = record.winner.map_or("draw", Player::name),
                length = record.game_length(),
                "game finished"
            );
            summary.record_game(&record);
        }

        tracing::info!(
            max_wins = summary.max_wins,
            min_wins = summary.min_wins,
            draws = summary.draws,
            "match complete"
        );
        Ok(summary)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(ArenaConfig::default(), ROWS, COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::StrategyKind;

    #[test]
    fn random_game_is_legal_and_complete() {
        let mut max = Agent::seeded_random(Player::Max, 1);
        let mut min = Agent::seeded_random(Player::Min, 2);
        let record = play_game(&mut max, &mut min, ROWS, COLS).unwrap();

        // Replaying the record reproduces the same result
        let mut state = GameState::default();
        for &column in &record.moves {
            state = state.apply_move(column).unwrap();
        }
        assert!(state.is_terminal());
        assert_eq!(state.board().winner(), record.winner);
        assert!(record.game_length() >= 7 && record.game_length() <= ROWS * COLS);
    }

    #[test]
    fn minimax_mirror_is_deterministic() {
        let mut first = (
            Agent::new(StrategyKind::Minimax, 2, Player::Max),
            Agent::new(StrategyKind::Minimax, 2, Player::Min),
        );
        let mut second = first.clone();
        let a = play_game(&mut first.0, &mut first.1, ROWS, COLS).unwrap();
        let b = play_game(&mut second.0, &mut second.1, ROWS, COLS).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seats_are_checked() {
        let mut max = Agent::seeded_random(Player::Min, 1);
        let mut min = Agent::seeded_random(Player::Min, 2);
        let err = play_game(&mut max, &mut min, ROWS, COLS).unwrap_err();
        assert!(matches!(
            err,
            MatchError::SeatMismatch {
                expected: Player::Max,
                found: Player::Min
            }
        ));
    }

    #[test]
    fn arena_tallies_every_game() {
        let arena = Arena::new(ArenaConfig { games: 6, seed: Some(3) }, 5, 6);
        let mut max = Agent::new(StrategyKind::Expectimax, 2, Player::Max);
        let mut min = Agent::seeded_random(Player::Min, 3);
        let summary = arena.run(&mut max, &mut min).unwrap();

        assert_eq!(summary.games, 6);
        assert_eq!(summary.max_wins + summary.min_wins + summary.draws, 6);
        assert_eq!(summary.max_agent, "Expectimax (depth 2)");
        assert_eq!(summary.min_agent, "Random");
        assert!(summary.max_wins >= 4, "{summary:?}");
    }
}
