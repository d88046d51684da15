use super::evaluation::Evaluator;
use super::search::{select_root, SearchResult};
use crate::error::SearchError;
use crate::game::{Board, Player};

/// Depth-limited expectimax. The opponent is modeled as choosing uniformly at
/// random, so its plies are chance nodes valued at the mean of their
/// children. No pruning is possible: every child contributes to the mean.
#[derive(Debug, Clone, Default)]
pub struct Expectimax {
    evaluator: Evaluator,
    nodes: u64,
}

impl Expectimax {
    pub fn new(evaluator: Evaluator) -> Self {
        Expectimax { evaluator, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    /// Value of `board` searched `depth` plies deep. `maximizing` is false on
    /// the opponent's chance plies.
    pub fn search(&mut self, board: &Board, depth: usize, maximizing: bool, perspective: Player) -> f64 {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return self.evaluator.evaluate(board, perspective);
        }

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for (_, child) in board.successors(perspective) {
                best = best.max(self.search(&child, depth - 1, false, perspective));
            }
            return best;
        }

        let mut total = 0.0;
        let mut count = 0usize;
        for (_, child) in board.successors(perspective.other()) {
            total += self.search(&child, depth - 1, true, perspective);
            count += 1;
        }

        // +inf and -inf children leave the mean undefined; the opponent's
        // winning reply decides it
        if total.is_nan() {
            return f64::NEG_INFINITY;
        }
        total / count as f64
    }

    /// Pick `player`'s move: each root move is valued by the opponent's
    /// chance node below it. A depth of 0 is treated as 1.
    pub fn best_move(
        &mut self,
        board: &Board,
        depth: usize,
        player: Player,
    ) -> Result<SearchResult, SearchError> {
        let child_depth = depth.saturating_sub(1);
        let start = self.nodes;
        let result = select_root(board, player, |child| {
            self.search(child, child_depth, false, player)
        })?;
        tracing::debug!(
            column = result.column,
            value = result.value,
            depth,
            %player,
            nodes = self.nodes - start,
            "expectimax selected move"
        );
        Ok(result)
    }
}

/// Expectimax move for `player` with the default evaluator.
pub fn best_move_expectimax(board: &Board, depth: usize, player: Player) -> Result<usize, SearchError> {
    Expectimax::default()
        .best_move(board, depth, player)
        .map(|result| result.column)
}
