use serde::Serialize;

use crate::game::Player;

/// Result of a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub winner: Option<Player>,
    /// Columns played, Max's move first.
    pub moves: Vec<usize>,
}

impl GameRecord {
    pub fn game_length(&self) -> usize {
        self.moves.len()
    }
}

/// Tally of a series of games between the same two agents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub max_agent: String,
    pub min_agent: String,
    pub games: usize,
    pub max_wins: usize,
    pub min_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl MatchSummary {
    pub fn new(max_agent: impl Into<String>, min_agent: impl Into<String>) -> Self {
        MatchSummary {
            max_agent: max_agent.into(),
            min_agent: min_agent.into(),
            ..Default::default()
        }
    }

    pub fn record_game(&mut self, record: &GameRecord) {
        self.games += 1;
        self.total_moves += record.game_length();
        match record.winner {
            Some(Player::Max) => self.max_wins += 1,
            Some(Player::Min) => self.min_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::Max => self.max_wins,
            Player::Min => self.min_wins,
        }
    }

    /// Fraction of games won by `player`.
    pub fn win_rate(&self, player: Player) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(player) as f32 / self.games as f32
    }

    pub fn draw_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.draws as f32 / self.games as f32
    }

    pub fn average_game_length(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f32 / self.games as f32
    }
}
