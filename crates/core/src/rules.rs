//! Pawn movement rules
//!
//! Pure functions over a [`Board`]: what a single pawn may do, and whether a
//! side has any move at all. Turn order and phases live in
//! [`GameState`](crate::game_state::GameState).

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Cell, Move, Player};

/// Destinations of a single pawn. A pawn has at most four: two captures,
/// one step and one double step.
pub type Destinations = ArrayVec<Cell, 4>;

/// Cells the pawn on `cell` can move to this ply
///
/// - one step forward onto an empty cell
/// - two steps forward from the starting row, both cells empty
/// - one step diagonally forward onto an opposing pawn
///
/// Returns an empty set for an empty cell. Destinations are ordered by
/// ascending (column, row).
///
/// # Examples
///
/// ```
/// use pawn_chess_core::{legal_destinations, Board};
/// use pawn_chess_core::types::Cell;
///
/// let board = Board::standard();
/// let moves = legal_destinations(&board, Cell::new(0, 1));
/// assert_eq!(moves.as_slice(), &[Cell::new(0, 2), Cell::new(0, 3)]);
/// ```
pub fn legal_destinations(board: &Board, cell: Cell) -> Destinations {
    let mut out = Destinations::new();
    let Some(pawn) = board.get(cell) else {
        return out;
    };
    let player = pawn.owner;
    let forward = player.forward();

    for dc in [-1i8, 1] {
        if let Some(target) = cell.offset(dc, forward) {
            if board.is_owned_by(target, player.opponent()) {
                out.push(target);
            }
        }
    }

    if let Some(step) = cell.offset(0, forward) {
        if board.is_empty(step) {
            out.push(step);
            if cell.row() == player.start_row() {
                if let Some(double) = cell.offset(0, 2 * forward) {
                    if board.is_empty(double) {
                        out.push(double);
                    }
                }
            }
        }
    }

    out.sort_unstable();
    out
}

/// True if the move is a legal pawn move on this board, for whoever owns `from`
pub fn is_legal(board: &Board, from: Cell, to: Cell) -> bool {
    legal_destinations(board, from).contains(&to)
}

/// True if some pawn of `player` has at least one destination
pub fn can_move(board: &Board, player: Player) -> bool {
    board
        .pawns_of(player)
        .any(|cell| !legal_destinations(board, cell).is_empty())
}

/// Every legal move of `player`, ordered by source cell then destination
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .pawns_of(player)
        .flat_map(|from| {
            legal_destinations(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_has_no_destinations() {
        let board = Board::standard();
        assert!(legal_destinations(&board, Cell::new(4, 4)).is_empty());
    }

    #[test]
    fn test_black_double_step_from_start_row() {
        let board = Board::standard();
        let moves = legal_destinations(&board, Cell::new(2, 6));
        assert_eq!(moves.as_slice(), &[Cell::new(2, 4), Cell::new(2, 5)]);
    }

    #[test]
    fn test_blocked_pawn_cannot_step_or_jump() {
        let board = Board::from_pawns(&[
            (Cell::new(3, 1), Player::White),
            (Cell::new(3, 2), Player::Black),
        ]);
        assert!(legal_destinations(&board, Cell::new(3, 1)).is_empty());
    }

    #[test]
    fn test_double_step_blocked_at_destination() {
        let board = Board::from_pawns(&[
            (Cell::new(3, 1), Player::White),
            (Cell::new(3, 3), Player::Black),
        ]);
        assert_eq!(
            legal_destinations(&board, Cell::new(3, 1)).as_slice(),
            &[Cell::new(3, 2)]
        );
    }

    #[test]
    fn test_capture_only_opponent() {
        let board = Board::from_pawns(&[
            (Cell::new(3, 3), Player::White),
            (Cell::new(2, 4), Player::Black),
            (Cell::new(4, 4), Player::White),
        ]);
        assert_eq!(
            legal_destinations(&board, Cell::new(3, 3)).as_slice(),
            &[Cell::new(2, 4), Cell::new(3, 4)]
        );
    }

    #[test]
    fn test_edge_pawn_stays_on_board() {
        let board = Board::from_pawns(&[(Cell::new(0, 6), Player::White)]);
        assert_eq!(
            legal_destinations(&board, Cell::new(0, 6)).as_slice(),
            &[Cell::new(0, 7)]
        );
    }

    #[test]
    fn test_can_move_and_legal_moves() {
        let board = Board::standard();
        assert!(can_move(&board, Player::White));
        assert_eq!(legal_moves(&board, Player::White).len(), 16);

        let stuck = Board::from_pawns(&[
            (Cell::new(0, 3), Player::White),
            (Cell::new(0, 4), Player::Black),
        ]);
        assert!(!can_move(&stuck, Player::White));
        assert!(!can_move(&stuck, Player::Black));
        assert!(legal_moves(&stuck, Player::Black).is_empty());
    }
}
