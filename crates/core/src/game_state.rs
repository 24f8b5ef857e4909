//! Game state module - the rules engine
//!
//! [`GameState`] is a plain value (board, side to move, phase, winner, age) that
//! enforces turn order, forced passes and end-of-game detection. It is cheap to
//! copy, which is what the search tree relies on: exploring a move works on an
//! independent copy and never touches the live game.

use crate::board::Board;
use crate::error::{MoveError, MoveResult};
use crate::rules::{self, Destinations};
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, GameMode, Move, Pawn, Phase, Player, FIRST_ROW, LAST_ROW};

/// Final result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::Draw => None,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
    phase: Phase,
    winner: Option<Player>,
    /// Monotonic move counter, advanced only in network games.
    ///
    /// This is the ordering token exported to the sync protocol.
    age: u64,
    mode: GameMode,
}

impl GameState {
    /// Create a new game with the standard lineup, White to move
    ///
    /// Network games start in `Waiting` until both peers are connected.
    pub fn new(mode: GameMode) -> Self {
        let phase = match mode {
            GameMode::Network => Phase::Waiting,
            GameMode::Hotseat | GameMode::Single => Phase::Running,
        };
        Self {
            board: Board::standard(),
            current_player: Player::White,
            phase,
            winner: None,
            age: 0,
            mode,
        }
    }

    /// Create a running game from an arbitrary position
    pub fn from_position(mode: GameMode, board: Board, to_move: Player) -> Self {
        Self {
            board,
            current_player: to_move,
            phase: Phase::Running,
            winner: None,
            age: 0,
            mode,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Winner of a finished game; None is a draw
    ///
    /// # Panics
    ///
    /// Panics if the game is not finished. Use [`GameState::outcome`] to query
    /// without that precondition.
    pub fn winner(&self) -> Option<Player> {
        assert!(
            self.phase == Phase::Finished,
            "Expected current phase to be {:?}, but instead it is {:?}",
            Phase::Finished,
            self.phase
        );
        self.winner
    }

    /// Result of the game, or None while it is still in progress
    pub fn outcome(&self) -> Option<Outcome> {
        if self.phase != Phase::Finished {
            return None;
        }
        Some(match self.winner {
            Some(player) => Outcome::Win(player),
            None => Outcome::Draw,
        })
    }

    /// Cells the pawn on `cell` may move to this ply
    pub fn legal_destinations(&self, cell: Cell) -> Destinations {
        rules::legal_destinations(&self.board, cell)
    }

    /// True if `player` has at least one legal move anywhere on the board
    pub fn can_move(&self, player: Player) -> bool {
        rules::can_move(&self.board, player)
    }

    /// Every legal move of `player`
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        rules::legal_moves(&self.board, player)
    }

    /// Check a move without applying it
    pub fn check_move(&self, from: Cell, to: Cell) -> MoveResult<()> {
        if self.phase != Phase::Running {
            return Err(MoveError::NotRunning(self.phase));
        }
        let Some(pawn) = self.board.get(from) else {
            return Err(MoveError::EmptySource(from));
        };
        if pawn.owner != self.current_player {
            return Err(MoveError::NotYourPawn {
                cell: from,
                owner: pawn.owner,
            });
        }
        if !rules::is_legal(&self.board, from, to) {
            return Err(MoveError::IllegalDestination { from, to });
        }
        Ok(())
    }

    /// Apply a move for the player on turn
    ///
    /// On error the state is left unchanged.
    pub fn try_move(&mut self, from: Cell, to: Cell) -> MoveResult<()> {
        self.check_move(from, to)?;
        self.execute_move(from, to);
        Ok(())
    }

    /// Apply a move for the player on turn; false if it was rejected
    pub fn attempt_move(&mut self, from: Cell, to: Cell) -> bool {
        self.try_move(from, to).is_ok()
    }

    fn execute_move(&mut self, from: Cell, to: Cell) {
        let mover = self.current_player;
        self.board.remove(from);
        self.board.set(to, Some(Pawn::new(mover)));
        if self.mode == GameMode::Network {
            self.age += 1;
        }
        if !self.evaluate_outcome(to) {
            self.current_player = self.next_player();
        }
    }

    /// Finish the game if the last move decided it
    ///
    /// Only the pawn that just moved is checked for a home-row arrival; moves
    /// strictly alternate so both sides can never arrive in the same ply.
    /// Returns true if the game is now finished.
    fn evaluate_outcome(&mut self, moved_to: Cell) -> bool {
        let reached_home_row = moved_to.row() == FIRST_ROW || moved_to.row() == LAST_ROW;
        if reached_home_row {
            self.finish(Some(self.current_player));
            return true;
        }
        if !self.can_move(Player::White) && !self.can_move(Player::Black) {
            let white = self.board.count(Player::White);
            let black = self.board.count(Player::Black);
            let winner = match white.cmp(&black) {
                std::cmp::Ordering::Greater => Some(Player::White),
                std::cmp::Ordering::Less => Some(Player::Black),
                std::cmp::Ordering::Equal => None,
            };
            self.finish(winner);
            return true;
        }
        false
    }

    /// Side to move after a committed, non-final move: the opponent, unless
    /// the opponent is immobile and must pass
    fn next_player(&self) -> Player {
        let opponent = self.current_player.opponent();
        if self.can_move(opponent) {
            opponent
        } else {
            self.current_player
        }
    }

    fn finish(&mut self, winner: Option<Player>) {
        self.phase = Phase::Finished;
        self.winner = winner;
    }

    /// Leave `Waiting` once both network peers are present
    ///
    /// Returns true if the phase changed.
    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Waiting {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.current_player,
            phase: self.phase,
            board: self.board,
            winner: if self.phase == Phase::Finished {
                self.winner
            } else {
                None
            },
            age: self.age,
        }
    }

    /// Replace player, phase, board, winner and age with a received snapshot
    pub fn apply_snapshot(&mut self, snapshot: &GameSnapshot) {
        self.board = snapshot.board;
        self.current_player = snapshot.player;
        self.phase = snapshot.phase;
        self.winner = if snapshot.phase == Phase::Finished {
            snapshot.winner
        } else {
            None
        };
        self.age = snapshot.age;
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
