//! Turn order, forced passes and end-of-game tests

use pawn_chess::core::{Board, GameSession, GameState, MoveError, Outcome};
use pawn_chess::types::{Cell, GameMode, Phase, Player};

#[test]
fn test_hotseat_opening_two_step() {
    let mut session = GameSession::new(GameMode::Hotseat);

    assert!(session.attempt_move(Cell::new(0, 1), Cell::new(0, 2)));
    assert_eq!(session.state().current_player(), Player::Black);

    assert!(session.attempt_move(Cell::new(0, 6), Cell::new(0, 4)));
    assert_eq!(session.state().current_player(), Player::White);
    assert_eq!(session.state().age(), 0);
    assert_eq!(session.state().phase(), Phase::Running);
}

#[test]
fn test_capture_onto_home_row_wins() {
    let board = Board::from_pawns(&[
        (Cell::new(3, 6), Player::White),
        (Cell::new(2, 7), Player::Black),
        (Cell::new(5, 4), Player::Black),
    ]);
    let mut state = GameState::from_position(GameMode::Hotseat, board, Player::White);

    let dests = state.legal_destinations(Cell::new(3, 6));
    assert_eq!(dests.as_slice(), &[Cell::new(2, 7), Cell::new(3, 7)]);

    assert!(state.attempt_move(Cell::new(3, 6), Cell::new(2, 7)));
    assert_eq!(state.phase(), Phase::Finished);
    assert_eq!(state.winner(), Some(Player::White));
    assert_eq!(state.outcome(), Some(Outcome::Win(Player::White)));
    assert_eq!(state.board().count(Player::Black), 1);
}

#[test]
fn test_black_reaching_row_zero_wins() {
    let board = Board::from_pawns(&[
        (Cell::new(6, 1), Player::Black),
        (Cell::new(0, 3), Player::White),
    ]);
    let mut state = GameState::from_position(GameMode::Hotseat, board, Player::Black);
    assert!(state.attempt_move(Cell::new(6, 1), Cell::new(6, 0)));
    assert_eq!(state.winner(), Some(Player::Black));
}

#[test]
fn test_rejected_move_leaves_state_unchanged() {
    let mut state = GameState::new(GameMode::Hotseat);
    let before = state;

    let attempts = [
        (Cell::new(0, 1), Cell::new(0, 4)), // too far
        (Cell::new(0, 6), Cell::new(0, 5)), // not White's pawn
        (Cell::new(3, 3), Cell::new(3, 4)), // empty source
        (Cell::new(0, 1), Cell::new(1, 2)), // diagonal without capture
    ];
    for (from, to) in attempts {
        assert!(!state.attempt_move(from, to));
        assert_eq!(state, before);
    }
}

#[test]
fn test_finished_game_rejects_moves() {
    let board = Board::from_pawns(&[
        (Cell::new(1, 6), Player::White),
        (Cell::new(4, 4), Player::Black),
    ]);
    let mut state = GameState::from_position(GameMode::Hotseat, board, Player::White);
    assert!(state.attempt_move(Cell::new(1, 6), Cell::new(1, 7)));
    assert_eq!(
        state.try_move(Cell::new(4, 4), Cell::new(4, 3)),
        Err(MoveError::NotRunning(Phase::Finished))
    );
}

#[test]
fn test_next_player_is_opponent_iff_opponent_can_move() {
    // Walk a few positions and compare the turn hand-over with can_move.
    let positions = [
        Board::standard(),
        Board::from_pawns(&[
            (Cell::new(0, 3), Player::White),
            (Cell::new(0, 4), Player::Black),
            (Cell::new(5, 1), Player::White),
        ]),
        Board::from_pawns(&[
            (Cell::new(2, 2), Player::White),
            (Cell::new(2, 3), Player::Black),
            (Cell::new(6, 2), Player::White),
            (Cell::new(6, 5), Player::Black),
        ]),
    ];
    for board in positions {
        let state = GameState::from_position(GameMode::Hotseat, board, Player::White);
        for mv in state.legal_moves(Player::White) {
            let mut next = state;
            assert!(next.attempt_move(mv.from, mv.to));
            if next.is_finished() {
                continue;
            }
            let expected = if next.can_move(Player::Black) {
                Player::Black
            } else {
                Player::White
            };
            assert_eq!(next.current_player(), expected, "after {}", mv);
        }
    }
}

#[test]
fn test_network_moves_advance_age() {
    let mut session = GameSession::new(GameMode::Network);
    assert_eq!(
        session.try_move(Cell::new(0, 1), Cell::new(0, 2)),
        Err(MoveError::NotRunning(Phase::Waiting))
    );
    assert!(session.begin());
    assert!(session.attempt_move(Cell::new(0, 1), Cell::new(0, 2)));
    assert!(session.attempt_move(Cell::new(0, 6), Cell::new(0, 5)));
    assert_eq!(session.state().age(), 2);

    // Rejected moves do not count
    assert!(!session.attempt_move(Cell::new(0, 2), Cell::new(0, 4)));
    assert_eq!(session.state().age(), 2);
}

#[test]
fn test_raw_coordinates_out_of_bounds() {
    let mut session = GameSession::new(GameMode::Hotseat);
    assert_eq!(
        session.attempt_move_at((8, 1), (8, 2)),
        Err(MoveError::OutOfBounds { column: 8, row: 1 })
    );
    assert!(session.attempt_move_at((2, 1), (2, 3)).is_ok());
}
