//! Error types for rejected moves
//!
//! A rejected move is ordinary user input, not a fault: the session is left
//! untouched and the reason is reported for diagnostic messaging.

use crate::types::{Cell, Phase, Player};

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Coordinates outside the board
    #[error("Cell ({column}, {row}) is out of bounds")]
    OutOfBounds { column: i8, row: i8 },

    /// Moves are only accepted while the game is running
    #[error("Game is not running (phase: {0:?})")]
    NotRunning(Phase),

    /// No pawn on the source cell
    #[error("No pawn on {0}")]
    EmptySource(Cell),

    /// The source pawn belongs to the player who is not on turn
    #[error("Pawn on {cell} belongs to {owner}, it is not their turn")]
    NotYourPawn { cell: Cell, owner: Player },

    /// The destination is not reachable by the pawn this ply
    #[error("Pawn on {from} cannot move to {to}")]
    IllegalDestination { from: Cell, to: Cell },

    /// Network game: the local player tried to move on the remote player's turn
    #[error("It is {current}'s turn, not {local}'s")]
    NotYourTurn { local: Player, current: Player },
}

/// Result type alias for move operations
pub type MoveResult<T> = Result<T, MoveError>;
