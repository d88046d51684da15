use super::{Board, Player};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Authoritative game held by a driver: the board, whose turn it is, and
/// the outcome once the game ends.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state
    pub fn initial(rows: usize, cols: usize) -> Self {
        GameState {
            board: Board::new(rows, cols),
            current_player: Player::Max, // Max starts
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player)?;

        // Only the piece just placed can have completed a line
        if self.board.check_win(row, column) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::initial(super::ROWS, super::COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Cell;
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::default();
        assert_eq!(state.current_player(), Player::Max);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::default();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::Min);
        assert_eq!(new_state.board().get(5, 3), Cell::Max);
        // Original state is untouched
        assert_eq!(state.board().get(5, 3), Cell::Empty);
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::default();

        // Max wins with horizontal line
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // Max
            if col < 3 {
                state = state.apply_move(col).unwrap(); // Min (different row)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::Max)));
        assert_eq!(state.board().winner(), Some(Player::Max));
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_on_small_board() {
        // On a 4x4 board, filling column pairs in this order never lines up four
        let pattern = [0, 1, 0, 1, 1, 0, 1, 0, 2, 3, 2, 3, 3, 2, 3, 2];
        let mut state = GameState::initial(4, 4);
        for &col in &pattern {
            state = state.apply_move(col).unwrap();
        }

        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert_eq!(state.board().winner(), None);
        assert!(state.board().is_full());
    }

    #[test]
    fn test_invalid_moves_are_rejected() {
        let state = GameState::default();
        assert_eq!(
            state.apply_move(9),
            Err(MoveError::InvalidColumn { column: 9, cols: 7 })
        );
    }
}
