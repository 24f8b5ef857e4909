//! Network client - keeps a local session in sync with the remote player
//!
//! The client subscribes to the session's `MoveCommitted` notifications and
//! sends a `state` line for every new local move. Received `state` lines are
//! applied through the [`AgeGate`], so echoes and stale snapshots are dropped.
//! The session leaves `Waiting` when the relay reports `peers_ready`; a client
//! the relay turns away stays `Waiting`.
//!
//! Lock order on every path is session, then age gate.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{GameSession, GameSnapshot, Interest, MoveError, MoveResult, SubscriptionId};
use crate::error::{NetError, NetFailure, NetResult};
use crate::protocol::{encode_line, parse_message, WireMessage};
use crate::server::{self, start_server, ServerConfig, ServerHandle};
use crate::sync::AgeGate;
use crate::types::{Cell, GameMode, Player, DEFAULT_PORT, IDLE_TIMEOUT_SECS};

/// The session shared between the local move path and the network reader
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Create a fresh network-mode session, waiting for its peer
pub fn new_network_session() -> SharedSession {
    Arc::new(Mutex::new(GameSession::new(GameMode::Network)))
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Silence from the relay for this long counts as a lost connection
    pub idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            idle_timeout: Duration::from_secs(IDLE_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create from the same environment variables as [`ServerConfig::from_env`]
    pub fn from_env() -> Self {
        let (host, port, idle_timeout) = server::endpoint_from_env();
        Self {
            host,
            port,
            idle_timeout,
        }
    }

    /// Connect to a relay already bound at `addr`
    pub fn for_addr(addr: SocketAddr) -> Self {
        Self {
            host: addr.ip().to_string(),
            port: addr.port(),
            ..Self::default()
        }
    }
}

/// Connected network player
///
/// Dropping the handle unsubscribes from the session and closes the
/// connection.
pub struct ClientHandle {
    local_player: Player,
    peer_addr: SocketAddr,
    session: SharedSession,
    gate: Arc<Mutex<AgeGate>>,
    outbound: mpsc::UnboundedSender<WireMessage>,
    failures: mpsc::UnboundedReceiver<NetFailure>,
    quitting: Arc<AtomicBool>,
    subscription: Option<SubscriptionId>,
    reader: JoinHandle<()>,
}

impl ClientHandle {
    pub fn local_player(&self) -> Player {
        self.local_player
    }

    /// Address of the relay
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    /// Current state of the shared session
    pub fn snapshot(&self) -> GameSnapshot {
        lock_session(&self.session).state().snapshot()
    }

    /// Current sync bookkeeping
    pub fn age_gate(&self) -> AgeGate {
        *lock_gate(&self.gate)
    }

    /// Play a move for the local player
    ///
    /// Rejected with [`MoveError::NotYourTurn`] while the remote player is on
    /// turn. An accepted move is sent to the peer by the session subscription.
    pub fn try_move(&self, from: Cell, to: Cell) -> MoveResult<()> {
        let mut session = lock_session(&self.session);
        let state = session.state();
        if !state.is_finished() && state.current_player() != self.local_player {
            return Err(MoveError::NotYourTurn {
                local: self.local_player,
                current: state.current_player(),
            });
        }
        session.try_move(from, to)
    }

    pub fn attempt_move(&self, from: Cell, to: Cell) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Leave the game
    ///
    /// Sends `quit` and stops sending further moves. The relay closing the
    /// connection afterwards is not reported as a failure.
    pub fn quit(&mut self) {
        self.quitting.store(true, Ordering::SeqCst);
        self.unsubscribe();
        let _ = self.outbound.send(WireMessage::Quit);
        info!(player = %self.local_player, "Quitting network game");
    }

    /// Wait for the next connection failure
    ///
    /// Returns None once the connection is fully shut down and every failure
    /// has been taken.
    pub async fn next_failure(&mut self) -> Option<NetFailure> {
        self.failures.recv().await
    }

    /// Take a pending connection failure without waiting
    pub fn try_failure(&mut self) -> Option<NetFailure> {
        self.failures.try_recv().ok()
    }

    fn unsubscribe(&mut self) {
        if let Some(id) = self.subscription.take() {
            lock_session(&self.session).unsubscribe(id);
        }
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.unsubscribe();
        self.reader.abort();
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("local_player", &self.local_player)
            .field("peer_addr", &self.peer_addr)
            .field("gate", &self.age_gate())
            .finish()
    }
}

// A handler panicking mid-notification poisons the lock; the game data itself
// is still consistent, so keep going.
fn lock_session(session: &SharedSession) -> std::sync::MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock_gate(gate: &Mutex<AgeGate>) -> std::sync::MutexGuard<'_, AgeGate> {
    gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn open_stream(config: &ClientConfig) -> NetResult<TcpStream> {
    let endpoint = (config.host.as_str(), config.port);
    let addrs: Vec<SocketAddr> = match tokio::net::lookup_host(endpoint).await {
        Ok(addrs) => addrs.collect(),
        Err(e) => {
            debug!(host = %config.host, error = %e, "Host lookup failed");
            Vec::new()
        }
    };
    if addrs.is_empty() {
        return Err(NetError::UnknownHost {
            host: config.host.clone(),
        });
    }

    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "Connect failed");
                last_err = Some((addr, e));
            }
        }
    }
    match last_err {
        Some((addr, e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
            Err(NetError::ConnectionRefused {
                addr: addr.to_string(),
                source: e,
            })
        }
        Some((_, e)) => Err(NetError::Io(e)),
        None => Err(NetError::UnknownHost {
            host: config.host.clone(),
        }),
    }
}

/// Connect `session` to the relay as `local_player`
///
/// Resolution and connection errors are returned directly; failures after
/// that (relay full, peer left, connection lost) arrive on the handle's
/// failure channel.
pub async fn connect_client(
    config: ClientConfig,
    session: SharedSession,
    local_player: Player,
) -> NetResult<ClientHandle> {
    let stream = open_stream(&config).await?;
    let peer_addr = stream.peer_addr()?;
    info!(addr = %peer_addr, player = %local_player, "Connected to relay");

    let (read_half, write_half) = stream.into_split();
    let (out_tx, out_rx) = mpsc::unbounded_channel::<WireMessage>();
    let (fail_tx, fail_rx) = mpsc::unbounded_channel::<NetFailure>();
    let gate = Arc::new(Mutex::new(AgeGate::new()));
    let quitting = Arc::new(AtomicBool::new(false));

    tokio::spawn(write_loop(write_half, out_rx));

    let subscription = {
        let gate = Arc::clone(&gate);
        let out_tx = out_tx.clone();
        lock_session(&session).subscribe(Interest::MoveCommitted, move |notification| {
            let snapshot = &notification.snapshot;
            if !lock_gate(&gate).accept_outgoing(snapshot.age) {
                debug!(age = snapshot.age, "Snapshot not newer than peer state, not sent");
                return;
            }
            debug!(age = snapshot.age, "Sending state");
            let _ = out_tx.send(WireMessage::state(snapshot));
        })
    };

    let reader = tokio::spawn(read_loop(
        read_half,
        config.idle_timeout,
        Arc::clone(&session),
        Arc::clone(&gate),
        Arc::clone(&quitting),
        fail_tx,
    ));

    Ok(ClientHandle {
        local_player,
        peer_addr,
        session,
        gate,
        outbound: out_tx,
        failures: fail_rx,
        quitting,
        subscription: Some(subscription),
        reader,
    })
}

async fn write_loop(mut writer: OwnedWriteHalf, mut rx: mpsc::UnboundedReceiver<WireMessage>) {
    while let Some(msg) = rx.recv().await {
        let line = match encode_line(&msg) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to encode message");
                continue;
            }
        };
        if writer.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        if writer.flush().await.is_err() {
            break;
        }
    }
    let _ = writer.shutdown().await;
}

async fn read_loop(
    reader: OwnedReadHalf,
    idle: Duration,
    session: SharedSession,
    gate: Arc<Mutex<AgeGate>>,
    quitting: Arc<AtomicBool>,
    failures: mpsc::UnboundedSender<NetFailure>,
) {
    let mut lines = BufReader::new(reader).lines();
    let failure = loop {
        let line = match tokio::time::timeout(idle, lines.next_line()).await {
            Ok(Ok(Some(line))) => line,
            Ok(Ok(None)) => {
                debug!("Relay closed the connection");
                break NetFailure::ConnectionLost;
            }
            Ok(Err(e)) => {
                debug!(error = %e, "Read failed");
                break NetFailure::ConnectionLost;
            }
            Err(_) => {
                warn!(timeout_secs = idle.as_secs(), "Relay idle timeout");
                break NetFailure::ConnectionLost;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_message(trimmed) {
            Ok(WireMessage::State(msg)) => match GameSnapshot::try_from(&msg) {
                Ok(snapshot) => apply_remote(&session, &gate, &snapshot),
                Err(e) => warn!(error = %e, "Dropping state message"),
            },
            Ok(WireMessage::PeersReady) => {
                if lock_session(&session).begin() {
                    info!("Both players connected, starting game");
                }
            }
            Ok(WireMessage::ServerFull) => break NetFailure::ServerFull,
            Ok(WireMessage::PeerDisconnected) | Ok(WireMessage::Quit) => {
                break NetFailure::PeerLeft
            }
            Err(e) => warn!(error = %e, "Malformed line from relay"),
        }
    };

    if quitting.load(Ordering::SeqCst) {
        debug!(failure = failure.as_str(), "Connection closed after quit");
        return;
    }
    info!(failure = failure.as_str(), "Network game ended");
    let _ = failures.send(failure);
}

/// Apply a received snapshot if it is newer than anything seen so far
pub(crate) fn apply_remote(session: &SharedSession, gate: &Mutex<AgeGate>, snapshot: &GameSnapshot) {
    let mut session = lock_session(session);
    let accepted = lock_gate(gate).accept_incoming(snapshot.age);
    if !accepted {
        debug!(age = snapshot.age, "Dropping stale snapshot");
        return;
    }
    debug!(age = snapshot.age, "Applying remote state");
    session.apply_remote(snapshot);
}

/// Join a hosted game as Black
///
/// The session stays `Waiting` until the relay confirms both players are
/// connected.
pub async fn join_game(config: ClientConfig, session: SharedSession) -> NetResult<ClientHandle> {
    connect_client(config, session, Player::Black).await
}

/// A game hosted on this machine: the relay plus the host's own client
#[derive(Debug)]
pub struct HostedGame {
    pub server: ServerHandle,
    pub client: ClientHandle,
}

/// Start a relay and connect to it as White
///
/// The session leaves `Waiting` when the second player connects.
pub async fn host_game(config: ServerConfig, session: SharedSession) -> anyhow::Result<HostedGame> {
    let idle_timeout = config.idle_timeout;
    let server = start_server(config).await?;
    let client_config = ClientConfig {
        idle_timeout,
        ..ClientConfig::for_addr(server.local_addr())
    };
    let client = connect_client(client_config, session, Player::White).await?;
    Ok(HostedGame { server, client })
}
