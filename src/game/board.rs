use std::fmt;
use std::str::FromStr;

use super::Player;
use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning line, and of every window the evaluator scores.
pub const WINDOW: usize = 4;

/// Line directions as (row step, column step). Row 0 is the top, so `(1, 1)`
/// runs down-right (\) and `(-1, 1)` runs up-right (/).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Max,
    Min,
}

impl Cell {
    /// Symbol used by the text form of a board.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Max => 'O',
            Cell::Min => 'X',
        }
    }

    fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' => Some(Cell::Empty),
            'O' | 'o' => Some(Cell::Max),
            'X' | 'x' => Some(Cell::Min),
            _ => None,
        }
    }

    /// The player occupying this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Max => Some(Player::Max),
            Cell::Min => Some(Player::Min),
        }
    }
}

/// A `rows x cols` Connect Four grid. Boards are plain values: every move
/// application produces a new board, so search branches never share state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Bounds-checked lookup with signed coordinates.
    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.rows as isize || col >= self.cols as isize {
            return None;
        }
        Some(self.get(row as usize, col as usize))
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols || self.rows == 0 {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Columns that can still be played, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }

        // Scan upward from the bottom row; the first empty cell receives the piece
        for row in (0..self.rows).rev() {
            if self.get(row, col) == Cell::Empty {
                self.set(row, col, player.to_cell());
                return Ok(row);
            }
        }

        Err(MoveError::ColumnFull(col))
    }

    /// Return a new board with `player`'s piece dropped into `col`. `self` is
    /// left untouched.
    pub fn apply(&self, col: usize, player: Player) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.drop_piece(col, player)?;
        Ok(next)
    }

    /// Every legal move for `player` paired with the board it produces, in
    /// ascending column order.
    pub fn successors(&self, player: Player) -> impl Iterator<Item = (usize, Board)> + '_ {
        (0..self.cols).filter_map(move |col| self.apply(col, player).ok().map(|next| (col, next)))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Number of cells in `col` holding `cell`.
    pub fn count_in_column(&self, col: usize, cell: Cell) -> usize {
        (0..self.rows).filter(|&row| self.get(row, col) == cell).count()
    }

    /// Every run of `WINDOW` consecutive cells along a row, a column, or
    /// either diagonal.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WINDOW]> + '_ {
        DIRECTIONS.iter().flat_map(move |&(dr, dc)| {
            (0..self.rows).flat_map(move |row| {
                (0..self.cols).filter_map(move |col| self.window_at(row, col, dr, dc))
            })
        })
    }

    fn window_at(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<[Cell; WINDOW]> {
        let mut window = [Cell::Empty; WINDOW];
        for (i, slot) in window.iter_mut().enumerate() {
            let step = i as isize;
            *slot = self.cell_at(row as isize + dr * step, col as isize + dc * step)?;
        }
        Some(window)
    }

    /// True if `player` owns four contiguous cells in any direction.
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        let cell = player.to_cell();
        self.windows().any(|window| window.iter().all(|&c| c == cell))
    }

    /// The player with four in a row. Max is checked first; both players
    /// holding a line is unreachable through legal play.
    pub fn winner(&self) -> Option<Player> {
        [Player::Max, Player::Min]
            .into_iter()
            .find(|&player| self.has_four_in_a_row(player))
    }

    /// True once someone has won or no column is playable.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Check if the last move at (row, col) resulted in a win
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let forward = self.run_length(row, col, dr, dc, cell);
            let backward = self.run_length(row, col, -dr, -dc, cell);
            1 + forward + backward >= WINDOW
        })
    }

    /// Count matching cells stepping away from (row, col), excluding the start.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while self.cell_at(r, c) == Some(cell) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(ROWS, COLS)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| self.get(row, col).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses the `Display` form: one line per row, top row first, using `.`,
/// `O` and `X`. Whitespace inside a line and blank lines are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid: Vec<Vec<Cell>> = Vec::new();
        for line in s.lines() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            let row = grid.len();
            let cells = symbols
                .iter()
                .enumerate()
                .map(|(col, &symbol)| {
                    Cell::from_symbol(symbol)
                        .ok_or(BoardParseError::UnknownSymbol { row, col, symbol })
                })
                .collect::<Result<Vec<_>, _>>()?;
            grid.push(cells);
        }

        let cols = grid.first().map(Vec::len).ok_or(BoardParseError::Empty)?;
        if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(BoardParseError::RaggedRow {
                row,
                expected: cols,
                found: cells.len(),
            });
        }

        let mut board = Board::new(grid.len(), cols);
        for (row, cells) in grid.into_iter().enumerate() {
            for (col, cell) in cells.into_iter().enumerate() {
                board.set(row, col, cell);
            }
        }

        for col in 0..board.cols {
            for row in 0..board.rows.saturating_sub(1) {
                if board.get(row, col) != Cell::Empty && board.get(row + 1, col) == Cell::Empty {
                    return Err(BoardParseError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().expect("test board parses")
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!((board.rows(), board.cols()), (ROWS, COLS));
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::default();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Player::Max).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Max);

        // Drop second piece in same column
        let row = board.drop_piece(3, Player::Min).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Min);
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let original = Board::default();
        let first = original.apply(2, Player::Max).unwrap();
        let second = original.apply(2, Player::Max).unwrap();

        assert_eq!(first, second);
        assert_eq!(original, Board::default());
        assert_eq!(first.get(5, 2), Cell::Max);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::default();

        // Fill column 0
        for _ in 0..ROWS {
            board.drop_piece(0, Player::Max).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.drop_piece(0, Player::Min), Err(MoveError::ColumnFull(0)));
        assert_eq!(board.apply(0, Player::Min), Err(MoveError::ColumnFull(0)));
        assert_eq!(board.legal_moves(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::default();
        assert_eq!(
            board.drop_piece(7, Player::Max),
            Err(MoveError::InvalidColumn { column: 7, cols: 7 })
        );
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(4, 4);
        for col in 0..4 {
            for _ in 0..4 {
                board.drop_piece(col, Player::Max).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.successors(Player::Min).count(), 0);
    }

    #[test]
    fn test_successors_follow_legal_moves() {
        let board = board(
            "X......
             O......
             X......
             O......
             X......
             O.....O",
        );
        let columns: Vec<usize> = board.successors(Player::Max).map(|(col, _)| col).collect();
        assert_eq!(columns, board.legal_moves());
        assert_eq!(columns, vec![1, 2, 3, 4, 5, 6]);
        for (col, next) in board.successors(Player::Max) {
            assert_eq!(next, board.apply(col, Player::Max).unwrap());
        }
    }

    #[test]
    fn test_window_count() {
        // 6x7: 24 horizontal, 21 vertical, 12 of each diagonal
        assert_eq!(Board::default().windows().count(), 69);
        assert_eq!(Board::new(4, 4).windows().count(), 10);
        assert_eq!(Board::new(3, 3).windows().count(), 0);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::default();
        // Create horizontal line at bottom row
        for col in 0..4 {
            board.drop_piece(col, Player::Max).unwrap();
        }
        assert!(board.check_win(5, 2)); // Check middle of the line
        assert!(board.has_four_in_a_row(Player::Max));
        assert!(!board.has_four_in_a_row(Player::Min));
        assert_eq!(board.winner(), Some(Player::Max));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::default();
        // Create vertical line in column 3
        for _ in 0..4 {
            board.drop_piece(3, Player::Min).unwrap();
        }
        assert!(board.check_win(2, 3)); // Check the 4th piece
        assert_eq!(board.winner(), Some(Player::Min));
    }

    #[test]
    fn test_diagonal_up_win() {
        let board = board(
            ".......
             .......
             ...O...
             ..OX...
             .OXX...
             OXXX...",
        );
        assert!(board.check_win(2, 3));
        assert!(board.check_win(5, 0));
        assert_eq!(board.winner(), Some(Player::Max));
    }

    #[test]
    fn test_diagonal_down_win() {
        let board = board(
            ".......
             .......
             ...X...
             ...OX..
             ...OOX.
             ..OOOOX",
        );
        // Max also holds the bottom row here; check the diagonal on its own
        assert!(board.check_win(2, 3));
        assert!(board.has_four_in_a_row(Player::Min));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::default();
        for col in 0..3 {
            board.drop_piece(col, Player::Max).unwrap();
        }
        assert!(!board.check_win(5, 1)); // Only 3 in a row
        assert_eq!(board.winner(), None);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_count_in_column() {
        let board = board(
            ".......
             .......
             .......
             ...O...
             ...X...
             ...O...",
        );
        assert_eq!(board.count_in_column(3, Cell::Max), 2);
        assert_eq!(board.count_in_column(3, Cell::Min), 1);
        assert_eq!(board.count_in_column(0, Cell::Max), 0);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let mut board = Board::default();
        board.drop_piece(3, Player::Max).unwrap();
        board.drop_piece(3, Player::Min).unwrap();
        board.drop_piece(0, Player::Max).unwrap();

        let text = board.to_string();
        assert!(text.ends_with("O . . O . . .\n"));
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_rejects_floating_piece() {
        let err = "....\n.O..\n....\n....".parse::<Board>().unwrap_err();
        assert_eq!(err, BoardParseError::FloatingPiece { row: 1, col: 1 });
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Board>().unwrap_err(), BoardParseError::Empty);
        assert_eq!(
            "....\n...".parse::<Board>().unwrap_err(),
            BoardParseError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            }
        );
        assert_eq!(
            "..Z.".parse::<Board>().unwrap_err(),
            BoardParseError::UnknownSymbol {
                row: 0,
                col: 2,
                symbol: 'Z'
            }
        );
    }
}
