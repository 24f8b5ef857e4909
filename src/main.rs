//! Pawn Chess relay host (default binary).
//!
//! Runs the two-player relay so both players can join from their own
//! machines. Settings come from the environment and can be overridden on the
//! command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pawn_chess::net::{check_port_available, start_server, ServerConfig, ServerStatus};

/// Pawn-only chess over a two-player relay
#[derive(Parser, Debug)]
#[command(name = "pawn-chess")]
#[command(about = "Pawn-only chess network relay", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the relay for one network game
    Serve {
        /// Address to bind (default: PAWN_CHESS_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (default: PAWN_CHESS_PORT or 43200)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { host, port } => serve(host, port).await,
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if config.port != 0 {
        check_port_available(&config.host, config.port)
            .map_err(|e| anyhow::anyhow!("port {} is not available: {}", config.port, e))?;
    }

    let server = start_server(config).await?;
    info!(addr = %server.local_addr(), "Waiting for two players");

    let mut status = server.subscribe_status();
    while status.changed().await.is_ok() {
        let current = *status.borrow();
        match current {
            ServerStatus::PeersPresent => info!("Both players connected"),
            ServerStatus::Closed => break,
            ServerStatus::WaitingForPeers => {}
        }
    }

    info!("Game over, relay closed");
    Ok(())
}
