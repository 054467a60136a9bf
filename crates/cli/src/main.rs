// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! AGMP Texas Hold'em CLI client.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, anyhow};
use clap::Parser;
use log::info;
use tokio::{net::TcpStream, signal, sync::broadcast};

use agmp_core::connection::EncryptedConnection;

pub mod client;
pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// The server address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server port.
    #[clap(long, short, default_value_t = 9871)]
    port: u16,
    /// The protocol version.
    #[clap(long, default_value_t = 1)]
    protocol_version: u8,
    /// The protocol minor version.
    #[clap(long, default_value_t = 0)]
    minor_version: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Connect to the server before starting the terminal.
    let addr = format!("{}:{}", cli.address, cli.port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|e| anyhow!("Connection to {addr} failed: {e}"))?;
    let mut conn = EncryptedConnection::connect(stream).await?;
    info!("Connected to {addr}");

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    let mut client = client::Client::new(cli.protocol_version, cli.minor_version);
    let mut terminal = terminal::Terminal::new();
    client.run(&mut conn, &mut terminal, shutdown_rx).await?;

    info!("Session {:?}, bank {}", client.state(), client.bank());
    Ok(())
}
