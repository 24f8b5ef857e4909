//! Network failures
//!
//! [`NetFailure`] is the coarse category a front end reacts to (show a dialog,
//! return to the menu). [`NetError`] carries the underlying cause for
//! connect-time errors and logging.

use std::fmt;
use std::io;

/// What went wrong with the connection, as seen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetFailure {
    /// Nothing is listening at the address
    ConnectionRefused,
    /// The host name did not resolve
    UnknownHost,
    /// The relay already has two players
    ServerFull,
    /// The other player quit or dropped
    PeerLeft,
    /// Our own connection broke or went idle too long
    ConnectionLost,
}

impl NetFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetFailure::ConnectionRefused => "connection_refused",
            NetFailure::UnknownHost => "unknown_host",
            NetFailure::ServerFull => "server_full",
            NetFailure::PeerLeft => "peer_left",
            NetFailure::ConnectionLost => "connection_lost",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            NetFailure::ConnectionRefused => "no game is hosted at this address",
            NetFailure::UnknownHost => "the host name could not be resolved",
            NetFailure::ServerFull => "the game already has two players",
            NetFailure::PeerLeft => "the other player left the game",
            NetFailure::ConnectionLost => "the connection to the game was lost",
        }
    }
}

impl fmt::Display for NetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Connection to {addr} refused")]
    ConnectionRefused {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Unknown host: {host}")]
    UnknownHost { host: String },

    #[error("Server is full")]
    ServerFull,

    #[error("Connection error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("State message contains an invalid board cell")]
    InvalidBoard,
}

impl NetError {
    pub fn failure(&self) -> NetFailure {
        match self {
            NetError::ConnectionRefused { .. } => NetFailure::ConnectionRefused,
            NetError::UnknownHost { .. } => NetFailure::UnknownHost,
            NetError::ServerFull => NetFailure::ServerFull,
            NetError::Io(_) | NetError::Json(_) | NetError::InvalidBoard => {
                NetFailure::ConnectionLost
            }
        }
    }
}

pub type NetResult<T> = Result<T, NetError>;
