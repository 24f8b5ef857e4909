//! Engine module - the computer opponent
//!
//! A fixed-depth minimax search over copies of [`GameState`](crate::core::GameState),
//! scored by a composite pawn-structure heuristic.
//!
//! # Evaluation
//!
//! All scores are from Black's point of view (Black is the computer side in
//! single-player games). White's terms are weighted by 1.5:
//!
//! | Heuristic | Score |
//! |-----------|-------|
//! | Material | black - 1.5 x white |
//! | Advancement | rows advanced by black - 1.5 x rows advanced by white |
//! | Capture risk | white at risk - 1.5 x black at risk |
//! | Isolation | white isolated - 1.5 x black isolated |
//! | Closeness to winning | +5000 / depth (Black won), -7500 / depth (White won) |
//!
//! # Example
//!
//! ```
//! use pawn_chess_engine::{compute_best_move, play_computer_turn};
//! use pawn_chess_engine::core::GameSession;
//! use pawn_chess_engine::types::{Cell, GameMode, Player};
//!
//! let mut session = GameSession::new(GameMode::Single);
//! session.attempt_move(Cell::new(4, 1), Cell::new(4, 3));
//!
//! let reply = compute_best_move(session.state());
//! assert!(reply.is_some());
//!
//! let played = play_computer_turn(&mut session);
//! assert_eq!(played.first().copied(), reply);
//! assert_eq!(session.state().current_player(), Player::White);
//! ```

pub mod evaluate;
pub mod opponent;
pub mod search;

pub use pawn_chess_core as core;
pub use pawn_chess_types as types;

pub use evaluate::{Evaluator, PawnStructure};
pub use opponent::{play_computer_turn, COMPUTER};
pub use search::{compute_best_move, MinimaxSearch, SearchConfig, SearchNode};
