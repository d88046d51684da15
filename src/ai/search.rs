use crate::error::SearchError;
use crate::game::{Board, Player};

/// A root decision: the chosen column and the value the search assigned it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub column: usize,
    pub value: f64,
}

/// Score every root move of `player` with `value_of` (called on the child
/// board) and keep the strictly greatest. Ties keep the lowest column, and a
/// root where every move scores `-inf` still returns the first legal move.
pub(crate) fn select_root<F>(board: &Board, player: Player, mut value_of: F) -> Result<SearchResult, SearchError>
where
    F: FnMut(&Board) -> f64,
{
    let mut best: Option<SearchResult> = None;

    for (column, child) in board.successors(player) {
        let value = value_of(&child);
        tracing::trace!(column, value, "root move scored");
        match best {
            Some(current) if value <= current.value => {}
            // NaN never replaces an existing choice
            Some(_) if value.is_nan() => {}
            _ => best = Some(SearchResult { column, value }),
        }
    }

    best.ok_or(SearchError::NoLegalMoves)
}
