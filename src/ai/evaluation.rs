use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Player};

/// Weights of the window heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Window holding four of the perspective player's pieces.
    pub four: f64,
    /// Three own pieces and one empty cell.
    pub three: f64,
    /// Two own pieces and two empty cells.
    pub two: f64,
    /// Three opponent pieces and one empty cell. Expected to be negative.
    pub opponent_three: f64,
    /// Per own piece in the center column.
    pub center: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            four: 1000.0,
            three: 10.0,
            two: 5.0,
            opponent_three: -80.0,
            center: 3.0,
        }
    }
}

/// Static evaluation of a board from one player's point of view.
///
/// Decided boards score `+inf` (perspective won), `-inf` (opponent won) or
/// `0.0` (draw). Anything else goes through the window heuristic, which is
/// recomputed for each perspective: the opponent-threat penalty has no
/// mirrored bonus, so the two perspectives are not negations of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluator {
    weights: HeuristicWeights,
}

impl Evaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Evaluator { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn evaluate(&self, board: &Board, player: Player) -> f64 {
        if board.has_four_in_a_row(player) {
            return f64::INFINITY;
        }
        if board.has_four_in_a_row(player.other()) {
            return f64::NEG_INFINITY;
        }
        if board.is_full() {
            return 0.0;
        }
        self.heuristic(board, player)
    }

    /// Window heuristic without the terminal checks.
    pub fn heuristic(&self, board: &Board, player: Player) -> f64 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();

        // Center column bonus
        let center = board.cols() / 2;
        let mut score = self.weights.center * board.count_in_column(center, own_cell) as f64;

        for window in board.windows() {
            let mut own = 0;
            let mut opp = 0;
            let mut empty = 0;
            for cell in window {
                match cell {
                    c if c == own_cell => own += 1,
                    c if c == opp_cell => opp += 1,
                    Cell::Empty => empty += 1,
                    _ => {}
                }
            }
            score += self.score_window(own, opp, empty);
        }

        score
    }

    fn score_window(&self, own: usize, opp: usize, empty: usize) -> f64 {
        let mut score = match (own, empty) {
            (4, _) => self.weights.four,
            (3, 1) => self.weights.three,
            (2, 2) => self.weights.two,
            _ => 0.0,
        };
        if opp == 3 && empty == 1 {
            score += self.weights.opponent_three;
        }
        score
    }
}

/// Evaluate `board` for `player` with the default weights.
pub fn evaluate(board: &Board, player: Player) -> f64 {
    Evaluator::default().evaluate(board, player)
}
