use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Cell;

/// One of the two symbolic players. Either may be the perspective a search
/// optimizes for; the other is always its opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Max,
    Min,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Max => Cell::Max,
            Player::Min => Cell::Min,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Max => "Max",
            Player::Min => "Min",
        }
    }

    /// Board symbol used in the text form
    pub fn symbol(self) -> char {
        self.to_cell().symbol()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
