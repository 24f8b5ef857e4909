//! Net module - two-player games over a TCP relay
//!
//! One player hosts: the host machine runs the relay server and connects its
//! own client to it, playing White. The other player joins as Black. The relay
//! forwards full game snapshots between the two clients; each client keeps its
//! own [`GameSession`](crate::core::GameSession) and applies only snapshots
//! newer than anything it has sent or applied.
//!
//! # Protocol Overview
//!
//! Line-delimited JSON over TCP (default port 43200):
//!
//! ```text
//! Server -> Client: {"type":"peers_ready"}    (to both, once the second player connects)
//! Client -> Server: {"type":"state","player":"black","phase":"running","board":[[0,...],...],"winner":null,"age":1}
//! Server -> Client: (the same line, to the other client)
//! Client -> Server: {"type":"quit"}
//! Server -> Client: {"type":"peer_disconnected"}
//! Server -> Client: {"type":"server_full"}    (third connection, then closed)
//! ```
//!
//! See [`protocol`] for the message types and [`server`] for the relay.
//!
//! # Failures
//!
//! Connect-time errors come back as [`NetError`]. Everything after that is
//! reported as a [`NetFailure`] on [`ClientHandle::next_failure`]. There is
//! no automatic reconnect.
//!
//! # Environment Variables
//!
//! - `PAWN_CHESS_HOST`: bind / connect address (default: "127.0.0.1")
//! - `PAWN_CHESS_PORT`: port number (default: 43200)
//! - `PAWN_CHESS_IDLE_TIMEOUT_SECS`: read idle timeout (default: 300)
//!
//! # Testing
//!
//! The relay can be driven by hand with netcat:
//!
//! ```bash
//! nc 127.0.0.1 43200
//! {"type":"quit"}
//! ```

pub mod client;
pub mod error;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod sync;

pub use pawn_chess_core as core;
pub use pawn_chess_types as types;

pub use client::{
    connect_client, host_game, join_game, new_network_session, ClientConfig, ClientHandle,
    HostedGame, SharedSession,
};
pub use error::{NetError, NetFailure, NetResult};
pub use protocol::{encode_line, parse_message, StateMessage, WireMessage};
pub use runtime::NetRuntime;
pub use server::{
    check_port_available, is_port_available, run_server, start_server, ServerConfig, ServerHandle,
    ServerStatus,
};
pub use sync::AgeGate;
