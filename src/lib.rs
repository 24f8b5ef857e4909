//! Pawn Chess (workspace facade crate).
//!
//! Exposes `pawn_chess::{types, core, engine, net}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use pawn_chess_core as core;
pub use pawn_chess_engine as engine;
pub use pawn_chess_net as net;
pub use pawn_chess_types as types;
