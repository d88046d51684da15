use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SearchError;
use crate::game::Board;

/// Baseline that picks uniformly among the legal columns.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible experiments.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn choose_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let idx = self.rng.random_range(0..moves.len());
        Ok(moves[idx])
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}
