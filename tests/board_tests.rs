//! Board and movement rule tests

use pawn_chess::core::{legal_destinations, legal_moves, Board};
use pawn_chess::types::{Cell, Player, BOARD_SIZE};

#[test]
fn test_standard_lineup() {
    let board = Board::standard();
    for column in 0..BOARD_SIZE {
        assert_eq!(board.owner(Cell::new(column, 1)), Some(Player::White));
        assert_eq!(board.owner(Cell::new(column, 6)), Some(Player::Black));
        for row in [0, 2, 3, 4, 5, 7] {
            assert!(board.is_empty(Cell::new(column, row)));
        }
    }
    assert_eq!(board.count(Player::White), 8);
    assert_eq!(board.count(Player::Black), 8);
}

#[test]
fn test_destinations_never_leave_the_board() {
    // Pawns on every cell of the edges, alternating colours
    let mut pawns = Vec::new();
    for i in 0..BOARD_SIZE {
        let player = if i % 2 == 0 { Player::White } else { Player::Black };
        pawns.push((Cell::new(i, 0), player));
        pawns.push((Cell::new(i, 7), player.opponent()));
        if i > 0 && i < 7 {
            pawns.push((Cell::new(0, i), player));
            pawns.push((Cell::new(7, i), player.opponent()));
        }
    }
    let board = Board::from_pawns(&pawns);
    for cell in Cell::all() {
        for dest in legal_destinations(&board, cell) {
            assert!(dest.column() < BOARD_SIZE && dest.row() < BOARD_SIZE);
        }
    }
}

#[test]
fn test_double_step_only_from_start_row_with_clear_path() {
    let board = Board::standard();
    let dests = legal_destinations(&board, Cell::new(4, 1));
    assert_eq!(dests.as_slice(), &[Cell::new(4, 2), Cell::new(4, 3)]);

    // Off the start row only a single step remains
    let board = Board::from_pawns(&[(Cell::new(4, 2), Player::White)]);
    let dests = legal_destinations(&board, Cell::new(4, 2));
    assert_eq!(dests.as_slice(), &[Cell::new(4, 3)]);

    // Blocked on the intermediate cell
    let board = Board::from_pawns(&[
        (Cell::new(4, 6), Player::Black),
        (Cell::new(4, 5), Player::White),
    ]);
    assert!(legal_destinations(&board, Cell::new(4, 6)).is_empty());

    // Blocked on the destination only
    let board = Board::from_pawns(&[
        (Cell::new(4, 6), Player::Black),
        (Cell::new(4, 4), Player::White),
    ]);
    let dests = legal_destinations(&board, Cell::new(4, 6));
    assert_eq!(dests.as_slice(), &[Cell::new(4, 5)]);
}

#[test]
fn test_capture_requires_enemy_pawn() {
    let board = Board::from_pawns(&[
        (Cell::new(3, 3), Player::White),
        (Cell::new(2, 4), Player::Black),
        (Cell::new(4, 4), Player::White),
    ]);
    let dests = legal_destinations(&board, Cell::new(3, 3));
    assert!(dests.contains(&Cell::new(2, 4)));
    assert!(!dests.contains(&Cell::new(4, 4)));
    assert!(dests.contains(&Cell::new(3, 4)));
}

#[test]
fn test_empty_cell_has_no_destinations() {
    let board = Board::standard();
    assert!(legal_destinations(&board, Cell::new(3, 4)).is_empty());
}

#[test]
fn test_legal_moves_ordered_by_source() {
    let moves = legal_moves(&Board::standard(), Player::White);
    assert_eq!(moves.len(), 16);
    assert!(moves.windows(2).all(|w| (w[0].from, w[0].to) < (w[1].from, w[1].to)));
}

#[test]
fn test_grid_round_trip_keeps_orientation() {
    let board = Board::from_pawns(&[(Cell::new(6, 2), Player::Black)]);
    let mut grid = [[0u8; 8]; 8];
    board.write_u8_grid(&mut grid);
    assert_eq!(grid[2][6], 2);
    assert_eq!(Board::from_u8_grid(&grid), Some(board));
}
