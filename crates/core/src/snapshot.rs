use crate::board::Board;
use crate::types::{Phase, Player};

/// Everything two network peers need to agree on
///
/// A snapshot replaces the receiving state wholesale; `age` orders snapshots
/// so stale or echoed ones can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub player: Player,
    pub phase: Phase,
    pub board: Board,
    /// Meaningful only when `phase` is `Finished`; None there means a draw
    pub winner: Option<Player>,
    pub age: u64,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            player: Player::White,
            phase: Phase::Running,
            board: Board::standard(),
            winner: None,
            age: 0,
        }
    }
}
