//! Static position evaluation
//!
//! Scores are from Black's point of view: positive favours Black, the computer
//! side. Every heuristic weighs White's contribution by [`OPPONENT_WEIGHT`], so
//! the computer plays cautiously.

use crate::core::{Board, GameState};
use crate::types::{Cell, Phase, Player, LAST_ROW, OPPONENT_WEIGHT, WIN_SCORE};

/// Scores a position at a given search depth
pub trait Evaluator {
    fn evaluate(&self, state: &GameState, depth: u32) -> f64;
}

/// Sum of five pawn-structure heuristics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PawnStructure;

impl Evaluator for PawnStructure {
    fn evaluate(&self, state: &GameState, depth: u32) -> f64 {
        let board = state.board();
        material(board)
            + advancement(board)
            + capture_risk(board)
            + isolation(board)
            + closeness_to_winning(state, depth)
    }
}

/// Black pawns minus weighted White pawns
pub fn material(board: &Board) -> f64 {
    board.count(Player::Black) as f64 - OPPONENT_WEIGHT * board.count(Player::White) as f64
}

/// Progress of each side away from its own back rank
pub fn advancement(board: &Board) -> f64 {
    let mut black = 0.0;
    let mut white = 0.0;
    for (cell, pawn) in board.pawns() {
        let row = cell.row() as f64;
        match pawn.owner {
            Player::Black => black += LAST_ROW as f64 - row,
            Player::White => white += row,
        }
    }
    black - OPPONENT_WEIGHT * white
}

/// White pawns at risk minus weighted Black pawns at risk
pub fn capture_risk(board: &Board) -> f64 {
    let (white, black) = count_by_owner(board, is_at_risk);
    white - OPPONENT_WEIGHT * black
}

/// White isolated pawns minus weighted Black isolated pawns
pub fn isolation(board: &Board) -> f64 {
    let (white, black) = count_by_owner(board, is_isolated);
    white - OPPONENT_WEIGHT * black
}

/// Bonus for a decided game, larger the sooner it is reached
///
/// `depth` is clamped to at least 1.
pub fn closeness_to_winning(state: &GameState, depth: u32) -> f64 {
    if state.phase() != Phase::Finished {
        return 0.0;
    }
    let depth = depth.max(1) as f64;
    match state.outcome().and_then(|o| o.winner()) {
        Some(Player::Black) => WIN_SCORE / depth,
        Some(Player::White) => -OPPONENT_WEIGHT * (WIN_SCORE / depth),
        None => 0.0,
    }
}

fn count_by_owner(board: &Board, pred: fn(&Board, Cell, Player) -> bool) -> (f64, f64) {
    let mut white = 0.0;
    let mut black = 0.0;
    for (cell, pawn) in board.pawns() {
        if pred(board, cell, pawn.owner) {
            match pawn.owner {
                Player::White => white += 1.0,
                Player::Black => black += 1.0,
            }
        }
    }
    (white, black)
}

/// An enemy pawn sits on a forward diagonal and no own pawn covers from behind
fn is_at_risk(board: &Board, cell: Cell, owner: Player) -> bool {
    let fwd = owner.forward();
    let holds = |dc: i8, dr: i8, player: Player| {
        cell.offset(dc, dr)
            .is_some_and(|c| board.is_owned_by(c, player))
    };
    let threatened = holds(-1, fwd, owner.opponent()) || holds(1, fwd, owner.opponent());
    let covered = holds(-1, -fwd, owner) || holds(1, -fwd, owner);
    threatened && !covered
}

fn is_isolated(board: &Board, cell: Cell, owner: Player) -> bool {
    const NEIGHBOURS: [(i8, i8); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];
    !NEIGHBOURS.iter().any(|&(dc, dr)| {
        cell.offset(dc, dr)
            .is_some_and(|c| board.is_owned_by(c, owner))
    })
}
