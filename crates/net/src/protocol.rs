//! Protocol module - JSON message types exchanged between peers and relay
//!
//! One JSON object per line, discriminated by `type`:
//!
//! | type | direction | payload |
//! |------|-----------|---------|
//! | `state` | client -> server -> other client | full game snapshot |
//! | `quit` | client -> server | none |
//! | `peers_ready` | server -> both clients | none |
//! | `server_full` | server -> rejected client | none |
//! | `peer_disconnected` | server -> remaining client | none |
//!
//! The board travels as `board[row][column]` with `0` empty, `1` white and
//! `2` black.

use serde::{Deserialize, Serialize};

use crate::core::{Board, GameSnapshot};
use crate::error::NetError;
use crate::types::{Phase, Player, BOARD_SIZE};

const SIZE: usize = BOARD_SIZE as usize;

/// Board rows as sent on the wire
pub type WireBoard = [[u8; SIZE]; SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WirePlayer {
    #[serde(rename = "white")]
    White,
    #[serde(rename = "black")]
    Black,
}

impl From<Player> for WirePlayer {
    fn from(player: Player) -> Self {
        match player {
            Player::White => WirePlayer::White,
            Player::Black => WirePlayer::Black,
        }
    }
}

impl From<WirePlayer> for Player {
    fn from(player: WirePlayer) -> Self {
        match player {
            WirePlayer::White => Player::White,
            WirePlayer::Black => Player::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WirePhase {
    #[serde(rename = "waiting")]
    Waiting,
    #[serde(rename = "running")]
    Running,
    #[serde(rename = "finished")]
    Finished,
}

impl From<Phase> for WirePhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Waiting => WirePhase::Waiting,
            Phase::Running => WirePhase::Running,
            Phase::Finished => WirePhase::Finished,
        }
    }
}

impl From<WirePhase> for Phase {
    fn from(phase: WirePhase) -> Self {
        match phase {
            WirePhase::Waiting => Phase::Waiting,
            WirePhase::Running => Phase::Running,
            WirePhase::Finished => Phase::Finished,
        }
    }
}

/// Full game state sent after every committed network move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub player: WirePlayer,
    pub phase: WirePhase,
    pub board: WireBoard,
    pub winner: Option<WirePlayer>,
    pub age: u64,
}

impl From<&GameSnapshot> for StateMessage {
    fn from(snapshot: &GameSnapshot) -> Self {
        let mut board = [[0u8; SIZE]; SIZE];
        snapshot.board.write_u8_grid(&mut board);
        Self {
            player: snapshot.player.into(),
            phase: snapshot.phase.into(),
            board,
            winner: snapshot.winner.map(WirePlayer::from),
            age: snapshot.age,
        }
    }
}

impl TryFrom<&StateMessage> for GameSnapshot {
    type Error = NetError;

    fn try_from(msg: &StateMessage) -> Result<Self, Self::Error> {
        let board = Board::from_u8_grid(&msg.board).ok_or(NetError::InvalidBoard)?;
        Ok(GameSnapshot {
            player: msg.player.into(),
            phase: msg.phase.into(),
            board,
            winner: msg.winner.map(Player::from),
            age: msg.age,
        })
    }
}

/// Every message of the protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireMessage {
    #[serde(rename = "state")]
    State(StateMessage),
    #[serde(rename = "quit")]
    Quit,
    /// Both players are connected; sessions leave `Waiting`
    #[serde(rename = "peers_ready")]
    PeersReady,
    #[serde(rename = "server_full")]
    ServerFull,
    #[serde(rename = "peer_disconnected")]
    PeerDisconnected,
}

impl WireMessage {
    pub fn state(snapshot: &GameSnapshot) -> Self {
        WireMessage::State(StateMessage::from(snapshot))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WireMessage::State(_) => "state",
            WireMessage::Quit => "quit",
            WireMessage::PeersReady => "peers_ready",
            WireMessage::ServerFull => "server_full",
            WireMessage::PeerDisconnected => "peer_disconnected",
        }
    }
}

/// Parse one line (without its newline)
pub fn parse_message(json: &str) -> Result<WireMessage, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a message as one newline-terminated line
pub fn encode_line(msg: &WireMessage) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(msg)?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_state_message_layout() {
        let snapshot = GameSnapshot {
            age: 5,
            ..GameSnapshot::default()
        };
        let line = encode_line(&WireMessage::state(&snapshot)).unwrap();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["type"], "state");
        assert_eq!(value["player"], "white");
        assert_eq!(value["phase"], "running");
        assert_eq!(value["winner"], serde_json::Value::Null);
        assert_eq!(value["age"], 5);
        assert_eq!(value["board"][1][0], 1);
        assert_eq!(value["board"][6][7], 2);
        assert_eq!(value["board"][3][3], 0);
    }

    #[test]
    fn test_unit_messages() {
        for (msg, text) in [
            (WireMessage::Quit, r#"{"type":"quit"}"#),
            (WireMessage::PeersReady, r#"{"type":"peers_ready"}"#),
            (WireMessage::ServerFull, r#"{"type":"server_full"}"#),
            (WireMessage::PeerDisconnected, r#"{"type":"peer_disconnected"}"#),
        ] {
            assert_eq!(serde_json::to_string(&msg).unwrap(), text);
            assert_eq!(parse_message(text).unwrap(), msg);
            assert_eq!(msg.kind(), &text[9..text.len() - 2]);
        }
    }

    #[test]
    fn test_state_converts_back_to_snapshot() {
        let board = Board::from_pawns(&[
            (Cell::new(2, 5), Player::White),
            (Cell::new(4, 0), Player::Black),
        ]);
        let snapshot = GameSnapshot {
            player: Player::Black,
            phase: Phase::Finished,
            board,
            winner: Some(Player::Black),
            age: 17,
        };
        let msg = StateMessage::from(&snapshot);
        assert_eq!(GameSnapshot::try_from(&msg).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_bad_cells_and_unknown_types() {
        let mut msg = StateMessage::from(&GameSnapshot::default());
        msg.board[0][0] = 3;
        assert!(matches!(
            GameSnapshot::try_from(&msg),
            Err(NetError::InvalidBoard)
        ));

        assert!(parse_message(r#"{"type":"hello"}"#).is_err());
        assert!(parse_message("not json").is_err());
    }
}
