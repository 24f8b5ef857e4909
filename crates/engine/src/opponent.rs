use tracing::{debug, warn};

use crate::core::GameSession;
use crate::search::compute_best_move;
use crate::types::{GameMode, Move, Player};

/// Side played by the computer in single-player games
pub const COMPUTER: Player = Player::Black;

/// Let the computer move until it is the human's turn again
///
/// Does nothing outside single-player games. Plays more than once when the
/// human is forced to pass. Returns the moves played, in order.
pub fn play_computer_turn(session: &mut GameSession) -> Vec<Move> {
    let mut played = Vec::new();
    if session.mode() != GameMode::Single {
        return played;
    }
    while session.state().is_running() && session.state().current_player() == COMPUTER {
        let Some(mv) = compute_best_move(session.state()) else {
            debug!("Computer has no legal move");
            break;
        };
        if let Err(err) = session.play(mv) {
            warn!(%mv, %err, "Computer move rejected");
            break;
        }
        debug!(%mv, age = session.state().age(), "Computer moved");
        played.push(mv);
    }
    played
}
