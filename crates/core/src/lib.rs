//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and change
//! notification logic. It has **zero dependencies** on UI, networking, or I/O,
//! making it:
//!
//! - **Deterministic**: the same moves always produce the same state
//! - **Copyable**: [`GameState`] is a plain value, so the search tree can explore
//!   moves on independent copies
//! - **Portable**: runs under any front end (GUI, terminal, headless, network)
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 board with flat-array pawn storage
//! - [`rules`]: pawn movement (steps, double steps, diagonal captures)
//! - [`game_state`]: turn order, forced passes, win/draw detection, age
//! - [`session`]: the live game aggregate with publish/subscribe notifications
//! - [`snapshot`]: the synchronizable content of a game
//! - [`error`]: reasons a move is rejected
//!
//! # Game Rules
//!
//! - **Pawns only**: each side starts with eight pawns on its second row
//! - **Movement**: one step forward onto an empty cell, two steps from the
//!   starting row, one step diagonally forward to capture
//! - **No** en-passant, no promotion
//! - **Forced pass**: a side without any legal move skips its turn
//! - **Win**: reaching the opponent's home row wins immediately
//! - **Blocked**: if neither side can move, more pawns wins; equal counts draw
//!
//! # Example
//!
//! ```
//! use pawn_chess_core::GameSession;
//! use pawn_chess_core::types::{Cell, GameMode, Player};
//!
//! let mut session = GameSession::new(GameMode::Hotseat);
//!
//! assert!(session.attempt_move(Cell::new(0, 1), Cell::new(0, 2)));
//! assert!(session.attempt_move(Cell::new(0, 6), Cell::new(0, 4)));
//!
//! assert_eq!(session.state().current_player(), Player::White);
//! assert_eq!(session.state().age(), 0); // only network games count moves
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod rules;
pub mod session;
pub mod snapshot;

pub use pawn_chess_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{MoveError, MoveResult};
pub use game_state::{GameState, Outcome};
pub use rules::{can_move, legal_destinations, legal_moves, Destinations};
pub use session::{GameSession, Interest, Notification, NotificationKind, SubscriptionId};
pub use snapshot::GameSnapshot;
