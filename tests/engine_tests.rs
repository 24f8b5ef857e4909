//! Computer opponent tests

use pawn_chess::core::{Board, GameSession, GameState};
use pawn_chess::engine::{
    compute_best_move, play_computer_turn, Evaluator, MinimaxSearch, PawnStructure, SearchConfig,
};
use pawn_chess::types::{Cell, GameMode, Move, Player};

#[test]
fn test_search_is_deterministic() {
    let mut state = GameState::new(GameMode::Single);
    assert!(state.attempt_move(Cell::new(3, 1), Cell::new(3, 3)));

    let first = compute_best_move(&state);
    for _ in 0..3 {
        assert_eq!(compute_best_move(&state), first);
    }
    assert!(first.is_some());
}

#[test]
fn test_search_never_touches_input_state() {
    let mut state = GameState::new(GameMode::Single);
    assert!(state.attempt_move(Cell::new(3, 1), Cell::new(3, 3)));
    let before = state;
    let _ = compute_best_move(&state);
    assert_eq!(state, before);
}

#[test]
fn test_best_move_is_legal() {
    let mut state = GameState::new(GameMode::Single);
    assert!(state.attempt_move(Cell::new(6, 1), Cell::new(6, 2)));
    let mv = compute_best_move(&state).unwrap();
    assert!(state.legal_moves(Player::Black).contains(&mv));
}

#[test]
fn test_takes_immediate_win() {
    let board = Board::from_pawns(&[
        (Cell::new(2, 1), Player::Black),
        (Cell::new(6, 5), Player::Black),
        (Cell::new(0, 2), Player::White),
        (Cell::new(5, 2), Player::White),
    ]);
    let state = GameState::from_position(GameMode::Single, board, Player::Black);
    assert_eq!(
        compute_best_move(&state),
        Some(Move::new(Cell::new(2, 1), Cell::new(2, 0)))
    );
}

#[test]
fn test_blocks_white_win_next_ply() {
    // White's (4,6) reaches row 7 next move unless Black captures it
    let board = Board::from_pawns(&[
        (Cell::new(5, 7), Player::Black),
        (Cell::new(1, 4), Player::Black),
        (Cell::new(4, 6), Player::White),
        (Cell::new(6, 1), Player::White),
    ]);
    let state = GameState::from_position(GameMode::Single, board, Player::Black);
    assert_eq!(
        compute_best_move(&state),
        Some(Move::new(Cell::new(5, 7), Cell::new(4, 6)))
    );
}

#[test]
fn test_no_move_when_blocked() {
    let board = Board::from_pawns(&[
        (Cell::new(4, 4), Player::Black),
        (Cell::new(4, 3), Player::White),
        (Cell::new(0, 1), Player::White),
    ]);
    let state = GameState::from_position(GameMode::Single, board, Player::Black);
    assert_eq!(compute_best_move(&state), None);
}

#[test]
fn test_custom_evaluator_drives_choice() {
    /// Prefers positions where Black's pawns have advanced furthest
    struct Rush;

    impl Evaluator for Rush {
        fn evaluate(&self, state: &GameState, _depth: u32) -> f64 {
            state
                .board()
                .pawns_of(Player::Black)
                .map(|cell| 7.0 - cell.row() as f64)
                .sum()
        }
    }

    let board = Board::from_pawns(&[
        (Cell::new(1, 6), Player::Black),
        (Cell::new(6, 1), Player::White),
    ]);
    let state = GameState::from_position(GameMode::Single, board, Player::Black);
    let search = MinimaxSearch::new(SearchConfig { depth: 1 }, Rush);
    assert_eq!(
        search.best_move(&state),
        Some(Move::new(Cell::new(1, 6), Cell::new(1, 4)))
    );

    let default = MinimaxSearch::new(SearchConfig::default(), PawnStructure);
    assert_eq!(default.config().depth, 3);
}

#[test]
fn test_single_player_round() {
    let mut session = GameSession::new(GameMode::Single);
    for (from, to) in [((4, 1), (4, 3)), ((3, 1), (3, 2)), ((5, 1), (5, 2))] {
        if session.state().is_finished() {
            break;
        }
        assert_eq!(session.state().current_player(), Player::White);
        let from = Cell::new(from.0, from.1);
        let to = Cell::new(to.0, to.1);
        if !session.attempt_move(from, to) {
            break;
        }
        let played = play_computer_turn(&mut session);
        assert!(!played.is_empty() || session.state().is_finished());
    }
    assert_eq!(session.state().age(), 0);
}
