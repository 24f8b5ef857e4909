//! TCP relay server
//!
//! Accepts at most two players and forwards every `state` line from one to
//! the other without looking inside it. Once the second player connects both
//! receive `peers_ready`. The relay lives for exactly one game: as soon as
//! either player leaves, the other is told, both connections are closed and
//! so is the listening socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, watch, Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::protocol::{encode_line, parse_message, WireMessage};
use crate::types::{DEFAULT_PORT, IDLE_TIMEOUT_SECS, MAX_PEERS};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// A peer silent for this long is dropped
    pub idle_timeout: Duration,
    pub max_peers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            idle_timeout: Duration::from_secs(IDLE_TIMEOUT_SECS),
            max_peers: MAX_PEERS,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// - `PAWN_CHESS_HOST`: bind address (default "127.0.0.1")
    /// - `PAWN_CHESS_PORT`: port (default 43200)
    /// - `PAWN_CHESS_IDLE_TIMEOUT_SECS`: idle read timeout (default 300)
    pub fn from_env() -> Self {
        let (host, port, idle_timeout) = endpoint_from_env();
        Self {
            host,
            port,
            idle_timeout,
            max_peers: MAX_PEERS,
        }
    }

    /// Config for tests and embedding: loopback, ephemeral port
    pub fn ephemeral() -> Self {
        Self {
            port: 0,
            ..Self::default()
        }
    }
}

pub(crate) fn endpoint_from_env() -> (String, u16, Duration) {
    use std::env;

    let host = env::var("PAWN_CHESS_HOST")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = env::var("PAWN_CHESS_PORT")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let idle_secs = env::var("PAWN_CHESS_IDLE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|&secs: &u64| secs > 0)
        .unwrap_or(IDLE_TIMEOUT_SECS);
    (host, port, Duration::from_secs(idle_secs))
}

/// Lifecycle of the relay as observed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerStatus {
    /// Listening, fewer than two players connected
    WaitingForPeers,
    /// Both players are connected; the game can start
    PeersPresent,
    /// A player left and the listener is closed
    Closed,
}

struct Peer {
    id: usize,
    addr: SocketAddr,
    tx: mpsc::UnboundedSender<String>,
}

/// Shared server state
struct ServerState {
    config: ServerConfig,
    peers: RwLock<Vec<Peer>>,
    status: watch::Sender<ServerStatus>,
    shutdown: Notify,
}

impl ServerState {
    fn new(config: ServerConfig, status: watch::Sender<ServerStatus>) -> Self {
        Self {
            config,
            peers: RwLock::new(Vec::new()),
            status,
            shutdown: Notify::new(),
        }
    }
}

/// Handle to a running relay
pub struct ServerHandle {
    addr: SocketAddr,
    status: watch::Receiver<ServerStatus>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl ServerHandle {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn status(&self) -> ServerStatus {
        *self.status.borrow()
    }

    /// A fresh receiver for status changes
    pub fn subscribe_status(&self) -> watch::Receiver<ServerStatus> {
        self.status.clone()
    }

    /// Wait until both players are connected
    ///
    /// Returns false if the relay closed first.
    pub async fn wait_for_peers(&mut self) -> bool {
        wait_for_peers(&mut self.status).await
    }

    /// Stop accepting connections; relayed connections are left to finish
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerHandle")
            .field("addr", &self.addr)
            .field("status", &self.status())
            .finish()
    }
}

async fn wait_for_peers(status: &mut watch::Receiver<ServerStatus>) -> bool {
    match status
        .wait_for(|s| *s != ServerStatus::WaitingForPeers)
        .await
    {
        Ok(s) => *s == ServerStatus::PeersPresent,
        Err(_) => false,
    }
}

/// Bind the listener and run the relay in the background
pub async fn start_server(config: ServerConfig) -> anyhow::Result<ServerHandle> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    let (status_tx, status_rx) = watch::channel(ServerStatus::WaitingForPeers);
    let task = tokio::spawn(accept_loop(listener, config, status_tx));
    Ok(ServerHandle {
        addr,
        status: status_rx,
        task,
    })
}

/// Run the relay in the current task
///
/// `ready_tx` receives the bound address once the listener is up. Returns
/// when the listener closes after a player leaves.
pub async fn run_server(
    config: ServerConfig,
    status_tx: watch::Sender<ServerStatus>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }
    accept_loop(listener, config, status_tx).await
}

async fn accept_loop(
    listener: TcpListener,
    config: ServerConfig,
    status_tx: watch::Sender<ServerStatus>,
) -> anyhow::Result<()> {
    let bound = listener.local_addr()?;
    info!(addr = %bound, "Relay listening");

    let state = Arc::new(ServerState::new(config, status_tx));
    let mut peer_id_counter = 0usize;

    loop {
        let (socket, addr) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = state.shutdown.notified() => break,
        };

        let mut peers = state.peers.write().await;
        if peers.len() >= state.config.max_peers {
            drop(peers);
            info!(peer = %addr, "Relay full, rejecting connection");
            tokio::spawn(reject_full(socket));
            continue;
        }

        peer_id_counter += 1;
        let peer_id = peer_id_counter;
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        peers.push(Peer { id: peer_id, addr, tx });
        let present = peers.len();
        info!(peer = peer_id, %addr, present, "Player connected");

        // Queued before the new peer's reader starts, so it precedes any relayed state
        if present == state.config.max_peers {
            if let Ok(line) = encode_line(&WireMessage::PeersReady) {
                for peer in peers.iter() {
                    let _ = peer.tx.send(line.clone());
                }
            }
            state.status.send_replace(ServerStatus::PeersPresent);
        }
        drop(peers);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            handle_peer(socket, peer_id, rx, state).await;
        });
    }

    drop(listener);
    info!(addr = %bound, "Relay listener closed");
    Ok(())
}

/// Tell a surplus connection the relay is full, then close it
async fn reject_full(mut socket: TcpStream) {
    if let Ok(line) = encode_line(&WireMessage::ServerFull) {
        let _ = socket.write_all(line.as_bytes()).await;
        let _ = socket.flush().await;
    }
    let _ = socket.shutdown().await;
}

/// Why a peer connection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Departure {
    Quit,
    Eof,
    ReadError,
    IdleTimeout,
    /// The other player left first
    RelayClosed,
}

async fn handle_peer(
    socket: TcpStream,
    peer_id: usize,
    mut rx: mpsc::UnboundedReceiver<String>,
    state: Arc<ServerState>,
) {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    // One writer per connection so relayed lines never interleave
    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
        let _ = writer.shutdown().await;
    });

    let idle = state.config.idle_timeout;
    let mut status = state.status.subscribe();
    let mut line = String::new();
    let departure = loop {
        line.clear();
        let read = tokio::select! {
            read = tokio::time::timeout(idle, reader.read_line(&mut line)) => read,
            _ = relay_closed(&mut status) => break Departure::RelayClosed,
        };
        match read {
            Ok(Ok(0)) => break Departure::Eof,
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                debug!(peer = peer_id, error = %e, "Read failed");
                break Departure::ReadError;
            }
            Err(_) => break Departure::IdleTimeout,
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_message(trimmed) {
            Ok(WireMessage::State(msg)) => {
                debug!(peer = peer_id, age = msg.age, "Relaying state");
                relay_to_others(&state, peer_id, format!("{trimmed}\n")).await;
            }
            Ok(WireMessage::Quit) => break Departure::Quit,
            Ok(other) => {
                debug!(peer = peer_id, kind = other.kind(), "Ignoring message");
            }
            Err(e) => {
                warn!(peer = peer_id, error = %e, "Malformed line");
            }
        }
    };

    info!(peer = peer_id, reason = ?departure, "Player left");
    if departure != Departure::RelayClosed {
        depart(&state, peer_id).await;
    }
    let _ = write_task.await;
}

async fn relay_closed(status: &mut watch::Receiver<ServerStatus>) {
    let _ = status.wait_for(|s| *s == ServerStatus::Closed).await;
}

async fn relay_to_others(state: &ServerState, from: usize, line: String) {
    let peers = state.peers.read().await;
    for peer in peers.iter().filter(|p| p.id != from) {
        let _ = peer.tx.send(line.clone());
    }
}

/// Remove a peer, notify the rest and close the relay
///
/// Remaining peers are dropped after the notice is queued, so their writers
/// flush it and close the socket.
async fn depart(state: &ServerState, peer_id: usize) {
    let mut peers = state.peers.write().await;
    peers.retain(|p| p.id != peer_id);
    if let Ok(line) = encode_line(&WireMessage::PeerDisconnected) {
        for peer in peers.iter() {
            debug!(peer = peer.id, addr = %peer.addr, "Sending peer_disconnected");
            let _ = peer.tx.send(line.clone());
        }
    }
    peers.clear();
    drop(peers);

    state.shutdown.notify_one();
    state.status.send_replace(ServerStatus::Closed);
}

/// Check whether `host:port` can be bound right now
pub fn check_port_available(host: &str, port: u16) -> std::io::Result<()> {
    let listener = std::net::TcpListener::bind((host, port))?;
    drop(listener);
    Ok(())
}

pub fn is_port_available(host: &str, port: u16) -> bool {
    check_port_available(host, port).is_ok()
}
