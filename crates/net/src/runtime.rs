//! Network runtime integration.
//!
//! Bridges synchronous front ends with the async relay and client.

use std::time::Duration;

use tokio::runtime::Runtime;

use crate::client::{self, ClientConfig, ClientHandle, HostedGame, SharedSession};
use crate::error::{NetFailure, NetResult};
use crate::server::{self, ServerConfig, ServerHandle};
use crate::types::Player;

/// Owns the tokio runtime that drives every network task.
///
/// Tasks started through the runtime keep running after the blocking call
/// returns, until their handles are dropped or the runtime itself is.
pub struct NetRuntime {
    rt: Runtime,
}

impl NetRuntime {
    pub fn new() -> anyhow::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("pawn-chess-net")
            .build()?;
        Ok(Self { rt })
    }

    pub fn start_server(&self, config: ServerConfig) -> anyhow::Result<ServerHandle> {
        self.rt.block_on(server::start_server(config))
    }

    pub fn connect_client(
        &self,
        config: ClientConfig,
        session: SharedSession,
        local_player: Player,
    ) -> NetResult<ClientHandle> {
        self.rt
            .block_on(client::connect_client(config, session, local_player))
    }

    pub fn host_game(
        &self,
        config: ServerConfig,
        session: SharedSession,
    ) -> anyhow::Result<HostedGame> {
        self.rt.block_on(client::host_game(config, session))
    }

    pub fn join_game(&self, config: ClientConfig, session: SharedSession) -> NetResult<ClientHandle> {
        self.rt.block_on(client::join_game(config, session))
    }

    /// Block until the client reports a failure or `timeout` passes.
    pub fn wait_for_failure(
        &self,
        client: &mut ClientHandle,
        timeout: Duration,
    ) -> Option<NetFailure> {
        self.rt
            .block_on(async { tokio::time::timeout(timeout, client.next_failure()).await })
            .ok()
            .flatten()
    }

    /// Block until the server reports both players, or `timeout` passes.
    pub fn wait_for_peers(&self, server: &mut ServerHandle, timeout: Duration) -> bool {
        self.rt
            .block_on(async { tokio::time::timeout(timeout, server.wait_for_peers()).await })
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for NetRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetRuntime").finish_non_exhaustive()
    }
}
