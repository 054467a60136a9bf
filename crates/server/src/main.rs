// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use log::error;
use std::time::Duration;

use agmp_core::poker::Chips;
use agmp_server::server;

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 9871)]
    port: u16,
    /// The minimum ante for a hand.
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    min_ante: u32,
    /// The initial bank for a new session.
    #[clap(long, default_value_t = 1000)]
    bank: u32,
    /// The protocol version.
    #[clap(long, default_value_t = 1)]
    protocol_version: u8,
    /// The protocol minor version.
    #[clap(long, default_value_t = 0)]
    minor_version: u16,
    /// Close sessions idle for more than this many seconds.
    #[clap(long)]
    read_timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = agmp_server::Config {
        address: cli.address,
        port: cli.port,
        min_ante: Chips::new(cli.min_ante),
        bank: Chips::new(cli.bank),
        version: cli.protocol_version,
        minor: cli.minor_version,
        read_timeout: cli.read_timeout.map(Duration::from_secs),
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
        std::process::exit(1);
    }
}
