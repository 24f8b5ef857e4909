//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, search, network protocol).
//!
//! # Board Geometry
//!
//! The board is the standard 8x8 chess board:
//!
//! - **Columns**: 0-7 (files A-H), left to right
//! - **Rows**: 0-7 (ranks 1-8), bottom to top
//! - **White** starts on row 1 and moves up (+1) towards row 7
//! - **Black** starts on row 6 and moves down (-1) towards row 0
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_SIZE` | 8 | Columns and rows per side |
//! | `SEARCH_DEPTH` | 3 | Plies the computer opponent looks ahead |
//! | `WIN_SCORE` | 5000.0 | Base value of a decided game in the evaluator |
//! | `OPPONENT_WEIGHT` | 1.5 | Weight applied to the human side of each heuristic |
//! | `DEFAULT_PORT` | 43200 | Well-known TCP port of the relay server |
//! | `MAX_PEERS` | 2 | Connections the relay server accepts |
//! | `IDLE_TIMEOUT_SECS` | 300 | Read timeout on an established connection |
//!
//! # Examples
//!
//! ```
//! use pawn_chess_types::{Cell, Player, BOARD_SIZE};
//!
//! let cell = Cell::new(3, 1);
//! assert_eq!(cell.column(), 3);
//! assert_eq!(cell.row(), 1);
//!
//! // Coordinate arithmetic never leaves the board
//! assert_eq!(cell.offset(0, Player::White.forward()), Some(Cell::new(3, 2)));
//! assert_eq!(Cell::new(0, 0).offset(-1, 0), None);
//!
//! assert_eq!(Player::White.opponent(), Player::Black);
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use std::fmt;

/// Board width and height in cells
pub const BOARD_SIZE: u8 = 8;

/// Number of cells on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// First row index (White's back rank, Black's target row)
pub const FIRST_ROW: u8 = 0;

/// Last row index (Black's back rank, White's target row)
pub const LAST_ROW: u8 = BOARD_SIZE - 1;

/// Look-ahead depth of the computer opponent in plies
pub const SEARCH_DEPTH: u32 = 3;

/// Base evaluation of a decided game, divided by the depth it was reached at
pub const WIN_SCORE: f64 = 5000.0;

/// Weight applied to White's share of each heuristic (Black is the maximizer)
pub const OPPONENT_WEIGHT: f64 = 1.5;

/// Well-known TCP port of the relay server
pub const DEFAULT_PORT: u16 = 43200;

/// Maximum number of peers the relay server accepts
pub const MAX_PEERS: usize = 2;

/// Idle read timeout on an established connection, in seconds
pub const IDLE_TIMEOUT_SECS: u64 = 300;


/// A square on the board
///
/// Cells are ordered by column first, then row, which is the canonical
/// enumeration order used for deterministic move generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    column: u8,
    row: u8,
}

impl Cell {
    /// Create a cell
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `0..BOARD_SIZE`. Cells built from
    /// untrusted input should go through [`Cell::try_new`].
    pub fn new(column: u8, row: u8) -> Self {
        assert!(
            column < BOARD_SIZE && row < BOARD_SIZE,
            "cell ({}, {}) is out of bounds",
            column,
            row
        );
        Self { column, row }
    }

    /// Create a cell from signed coordinates
    ///
    /// Returns None if the coordinates are off the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use pawn_chess_types::Cell;
    ///
    /// assert_eq!(Cell::try_new(7, 7), Some(Cell::new(7, 7)));
    /// assert_eq!(Cell::try_new(-1, 3), None);
    /// assert_eq!(Cell::try_new(2, 8), None);
    /// ```
    pub fn try_new(column: i8, row: i8) -> Option<Self> {
        if column < 0 || row < 0 || column >= BOARD_SIZE as i8 || row >= BOARD_SIZE as i8 {
            return None;
        }
        Some(Self {
            column: column as u8,
            row: row as u8,
        })
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// Cell reached by moving `dc` columns and `dr` rows, if still on the board
    pub fn offset(&self, dc: i8, dr: i8) -> Option<Self> {
        Self::try_new(self.column as i8 + dc, self.row as i8 + dr)
    }

    /// Flat index (row-major, `row * BOARD_SIZE + column`)
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.column as usize)
    }

    /// Inverse of [`Cell::index`]
    pub fn from_index(index: usize) -> Self {
        Self::new(
            (index % BOARD_SIZE as usize) as u8,
            (index / BOARD_SIZE as usize) as u8,
        )
    }

    /// Every cell on the board in ascending (column, row) order
    pub fn all() -> impl DoubleEndedIterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|column| (0..BOARD_SIZE).map(move |row| Cell { column, row }))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

/// The two sides
///
/// White always moves first. Black is the side played by the computer
/// opponent in single-player games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row delta of a forward step (+1 for White, -1 for Black)
    pub fn forward(&self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Row the player's pawns start on; the only row allowing a two-cell advance
    pub fn start_row(&self) -> u8 {
        match self {
            Player::White => FIRST_ROW + 1,
            Player::Black => LAST_ROW - 1,
        }
    }

    /// Opponent's home row; reaching it wins the game
    pub fn target_row(&self) -> u8 {
        match self {
            Player::White => LAST_ROW,
            Player::Black => FIRST_ROW,
        }
    }

    /// Parse player from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use pawn_chess_types::Player;
    ///
    /// assert_eq!(Player::from_str("white"), Some(Player::White));
    /// assert_eq!(Player::from_str("BLACK"), Some(Player::Black));
    /// assert_eq!(Player::from_str("red"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "white" | "w" => Some(Player::White),
            "black" | "b" => Some(Player::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => f.write_str("White"),
            Player::Black => f.write_str("Black"),
        }
    }
}

/// Lifecycle phase of a game
///
/// - **Waiting**: network game waiting for the second peer
/// - **Running**: moves are accepted
/// - **Finished**: terminal; start a new session to play again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Waiting,
    Running,
    Finished,
}

/// How the two sides are controlled; fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Both sides play on the same machine
    Hotseat,
    /// White is human, Black is the computer opponent
    Single,
    /// Each side is a separate process synchronized through the relay server
    Network,
}

/// A pawn; pawns of the same owner are interchangeable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pawn {
    pub owner: Player,
}

impl Pawn {
    pub fn new(owner: Player) -> Self {
        Self { owner }
    }
}

/// A single ply: the pawn on `from` goes to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}
