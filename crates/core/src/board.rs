//! Board module - manages the game grid
//!
//! The board is an 8x8 grid where each cell can be empty or hold a pawn.
//! Uses a flat array for better cache locality and cheap copies: the search
//! tree clones a board for every node it expands.
//! Coordinates: (column, row) where column ranges 0..7 (left to right),
//! row ranges 0..7 (White's side to Black's side).

use crate::types::{Cell, Pawn, Player, BOARD_SIZE, CELL_COUNT};

/// The game board - 8 columns x 8 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + column)
    cells: [Option<Pawn>; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Create a board with the starting lineup: a full row of White pawns on
    /// row 1 and a full row of Black pawns on row 6
    pub fn standard() -> Self {
        let mut board = Self::new();
        for column in 0..BOARD_SIZE {
            board.set(
                Cell::new(column, Player::White.start_row()),
                Some(Pawn::new(Player::White)),
            );
            board.set(
                Cell::new(column, Player::Black.start_row()),
                Some(Pawn::new(Player::Black)),
            );
        }
        board
    }

    /// Build a board from explicit pawn placements
    ///
    /// # Examples
    ///
    /// ```
    /// use pawn_chess_core::Board;
    /// use pawn_chess_core::types::{Cell, Player};
    ///
    /// let board = Board::from_pawns(&[
    ///     (Cell::new(3, 6), Player::White),
    ///     (Cell::new(2, 7), Player::Black),
    /// ]);
    /// assert_eq!(board.count(Player::White), 1);
    /// assert_eq!(board.owner(Cell::new(2, 7)), Some(Player::Black));
    /// ```
    pub fn from_pawns(pawns: &[(Cell, Player)]) -> Self {
        let mut board = Self::new();
        for &(cell, owner) in pawns {
            board.set(cell, Some(Pawn::new(owner)));
        }
        board
    }

    /// Get the pawn on a cell
    #[inline(always)]
    pub fn get(&self, cell: Cell) -> Option<Pawn> {
        self.cells[cell.index()]
    }

    /// Owner of the pawn on a cell, if any
    #[inline(always)]
    pub fn owner(&self, cell: Cell) -> Option<Player> {
        self.get(cell).map(|pawn| pawn.owner)
    }

    /// Set or clear a cell; any pawn already there is replaced
    pub fn set(&mut self, cell: Cell, pawn: Option<Pawn>) {
        self.cells[cell.index()] = pawn;
    }

    /// Clear a cell and return what was on it
    pub fn remove(&mut self, cell: Cell) -> Option<Pawn> {
        self.cells[cell.index()].take()
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// True if the cell holds a pawn owned by `player`
    pub fn is_owned_by(&self, cell: Cell, player: Player) -> bool {
        self.owner(cell) == Some(player)
    }

    /// All occupied cells in ascending (column, row) order
    pub fn pawns(&self) -> impl DoubleEndedIterator<Item = (Cell, Pawn)> + '_ {
        Cell::all().filter_map(move |cell| self.get(cell).map(|pawn| (cell, pawn)))
    }

    /// Cells holding a pawn of `player`, in ascending (column, row) order
    pub fn pawns_of(&self, player: Player) -> impl DoubleEndedIterator<Item = Cell> + '_ {
        self.pawns()
            .filter(move |(_, pawn)| pawn.owner == player)
            .map(|(cell, _)| cell)
    }

    /// Number of pawns owned by `player`
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(pawn) if pawn.owner == player))
            .count()
    }

    /// Number of pawns owned by `player` on one row
    pub fn count_in_row(&self, player: Player, row: u8) -> usize {
        (0..BOARD_SIZE)
            .filter(|&column| self.is_owned_by(Cell::new(column, row), player))
            .count()
    }

    /// Write the board as a u8 grid indexed `[row][column]`
    /// (0 = empty, 1 = White, 2 = Black)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize]) {
        for cell in Cell::all() {
            out[cell.row() as usize][cell.column() as usize] = match self.owner(cell) {
                None => 0,
                Some(Player::White) => 1,
                Some(Player::Black) => 2,
            };
        }
    }

    /// Inverse of [`Board::write_u8_grid`]
    ///
    /// Returns None if any entry is not 0, 1 or 2.
    pub fn from_u8_grid(grid: &[[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Option<Self> {
        let mut board = Self::new();
        for cell in Cell::all() {
            let pawn = match grid[cell.row() as usize][cell.column() as usize] {
                0 => None,
                1 => Some(Pawn::new(Player::White)),
                2 => Some(Pawn::new(Player::Black)),
                _ => return None,
            };
            board.set(cell, pawn);
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(Cell::new(0, 0), Some(Pawn::new(Player::White)));
        board.set(Cell::new(5, 3), Some(Pawn::new(Player::Black)));

        assert_eq!(board.owner(Cell::new(0, 0)), Some(Player::White));
        assert_eq!(board.owner(Cell::new(5, 3)), Some(Player::Black));

        // Verify internal array
        assert_eq!(board.cells[0], Some(Pawn::new(Player::White)));
        assert_eq!(board.cells[3 * 8 + 5], Some(Pawn::new(Player::Black)));
    }

    #[test]
    fn test_standard_lineup() {
        let board = Board::standard();
        assert_eq!(board.count(Player::White), 8);
        assert_eq!(board.count(Player::Black), 8);
        assert_eq!(board.count_in_row(Player::White, 1), 8);
        assert_eq!(board.count_in_row(Player::Black, 6), 8);
        for column in 0..BOARD_SIZE {
            assert!(board.is_empty(Cell::new(column, 0)));
            assert!(board.is_empty(Cell::new(column, 7)));
        }
    }

    #[test]
    fn test_remove_returns_previous() {
        let mut board = Board::standard();
        let cell = Cell::new(4, 1);
        assert_eq!(board.remove(cell), Some(Pawn::new(Player::White)));
        assert_eq!(board.remove(cell), None);
        assert_eq!(board.count(Player::White), 7);
    }

    #[test]
    fn test_u8_grid_roundtrip() {
        let board = Board::standard();
        let mut grid = [[0u8; 8]; 8];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[1], [1; 8]);
        assert_eq!(grid[6], [2; 8]);
        assert_eq!(Board::from_u8_grid(&grid), Some(board));

        grid[3][3] = 7;
        assert_eq!(Board::from_u8_grid(&grid), None);
    }

    #[test]
    fn test_pawns_of_is_ordered() {
        let board = Board::from_pawns(&[
            (Cell::new(5, 2), Player::Black),
            (Cell::new(1, 4), Player::Black),
            (Cell::new(1, 3), Player::White),
        ]);
        let black: Vec<Cell> = board.pawns_of(Player::Black).collect();
        assert_eq!(black, vec![Cell::new(1, 4), Cell::new(5, 2)]);
    }
}
