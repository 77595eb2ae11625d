// ABOUTME: CalTrack server binary: loads configuration, connects storage, serves HTTP
// ABOUTME: All settings come from the environment; flags only override the port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

//! Server binary entry point

use anyhow::Result;
use clap::Parser;
use tracing::info;

use caltrack_server::config::ServerConfig;
use caltrack_server::database::Database;
use caltrack_server::logging::init_logging;
use caltrack_server::resources::ServerResources;
use caltrack_server::server;

/// Personal diet and fitness tracking API server
#[derive(Parser)]
#[command(name = "caltrack-server", version, about)]
struct Args {
    /// Override the HTTP port from the environment
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    info!(
        port = config.http_port,
        database = %config.database_url,
        push_configured = config.onesignal.is_some(),
        "Starting {}",
        config.app_name
    );

    let database = Database::new(&config.database_url).await?;
    let resources = ServerResources::new(database, config);
    server::serve(resources).await?;
    Ok(())
}
