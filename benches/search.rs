use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pawn_chess::core::{legal_moves, Board, GameState};
use pawn_chess::engine::{compute_best_move, evaluate, Evaluator, PawnStructure};
use pawn_chess::types::{Cell, GameMode, Player};

fn opening_reply() -> GameState {
    let mut state = GameState::new(GameMode::Single);
    state.attempt_move(Cell::new(4, 1), Cell::new(4, 3));
    state
}

fn midgame() -> GameState {
    let board = Board::from_pawns(&[
        (Cell::new(0, 2), Player::White),
        (Cell::new(2, 3), Player::White),
        (Cell::new(3, 3), Player::White),
        (Cell::new(5, 1), Player::White),
        (Cell::new(7, 2), Player::White),
        (Cell::new(1, 5), Player::Black),
        (Cell::new(3, 4), Player::Black),
        (Cell::new(4, 5), Player::Black),
        (Cell::new(6, 6), Player::Black),
        (Cell::new(7, 4), Player::Black),
    ]);
    GameState::from_position(GameMode::Single, board, Player::Black)
}

fn bench_best_move(c: &mut Criterion) {
    let opening = opening_reply();
    c.bench_function("best_move_opening", |b| {
        b.iter(|| compute_best_move(black_box(&opening)))
    });

    let midgame = midgame();
    c.bench_function("best_move_midgame", |b| {
        b.iter(|| compute_best_move(black_box(&midgame)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let state = midgame();
    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| PawnStructure.evaluate(black_box(&state), 2))
    });
    c.bench_function("capture_risk_midgame", |b| {
        b.iter(|| evaluate::capture_risk(black_box(state.board())))
    });
}

fn bench_move_generation(c: &mut Criterion) {
    let board = Board::standard();
    c.bench_function("legal_moves_standard", |b| {
        b.iter(|| legal_moves(black_box(&board), Player::White))
    });
}

criterion_group!(benches, bench_best_move, bench_evaluate, bench_move_generation);
criterion_main!(benches);
