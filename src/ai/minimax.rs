use super::evaluation::Evaluator;
use super::search::{select_root, SearchResult};
use crate::error::SearchError;
use crate::game::{Board, Player};

/// Depth-limited minimax with alpha-beta pruning.
///
/// Every call names a perspective player; maximizing plies move for that
/// player and minimizing plies move for its opponent. Values are always
/// evaluated from the perspective player's side.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    evaluator: Evaluator,
    nodes: u64,
}

impl Minimax {
    pub fn new(evaluator: Evaluator) -> Self {
        Minimax { evaluator, nodes: 0 }
    }

    /// Nodes visited since construction or the last `reset_nodes`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    /// Value of `board` searched `depth` plies deep.
    pub fn search(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        perspective: Player,
    ) -> f64 {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return self.evaluator.evaluate(board, perspective);
        }

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for (_, child) in board.successors(perspective) {
                let value = self.search(&child, depth - 1, alpha, beta, false, perspective);
                best = best.max(value);
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for (_, child) in board.successors(perspective.other()) {
                let value = self.search(&child, depth - 1, alpha, beta, true, perspective);
                best = best.min(value);
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }

    /// Pick `player`'s move: each root move is answered by an opponent ply
    /// searched with a fresh `(-inf, +inf)` window. A depth of 0 is treated
    /// as 1.
    pub fn best_move(
        &mut self,
        board: &Board,
        depth: usize,
        player: Player,
    ) -> Result<SearchResult, SearchError> {
        let child_depth = depth.saturating_sub(1);
        let start = self.nodes;
        let result = select_root(board, player, |child| {
            self.search(
                child,
                child_depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
                player,
            )
        })?;
        tracing::debug!(
            column = result.column,
            value = result.value,
            depth,
            %player,
            nodes = self.nodes - start,
            "minimax selected move"
        );
        Ok(result)
    }
}

/// Minimax move for `player` with the default evaluator.
pub fn best_move_minimax(board: &Board, depth: usize, player: Player) -> Result<usize, SearchError> {
    Minimax::default()
        .best_move(board, depth, player)
        .map(|result| result.column)
}
